use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub type MovieId = i64;

// The record is kept whole, in source key order, so responses echo it unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Movie {
    id: MovieId,
    fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Movie {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = fields
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| format!("movie record has no integer id: {:?}", fields.get("id")))?;
        Ok(Self { id, fields })
    }
}

impl Serialize for Movie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl Movie {
    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn original_title(&self) -> Option<&str> {
        self.text("original_title")
    }

    pub fn overview(&self) -> Option<&str> {
        self.text("overview")
    }

    // Null, missing and non-string values all read as absent.
    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoviesDocument {
    pub items: Vec<Movie>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageAssignment {
    pub page: i64,
    #[serde(rename = "movieIds", default)]
    pub movie_ids: Vec<MovieId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagesMetadata {
    pub created_by: Option<String>,
    pub description: Option<String>,
    pub favorite_count: Option<u64>,
    pub iso_639_1: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub total_results: Option<u64>,
    #[serde(default)]
    pub page_list: Vec<PageAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesDocument {
    pub pages: PagesMetadata,
}

// Field order is part of the wire contract.
#[derive(Debug, Serialize)]
pub struct PageResponse<'a> {
    pub created_by: Option<&'a str>,
    pub description: Option<&'a str>,
    pub favorite_count: Option<u64>,
    pub id: i64,
    pub iso_639_1: Option<&'a str>,
    pub item_count: usize,
    pub name: Option<&'a str>,
    pub poster_path: Option<&'a str>,
    pub total_results: Option<u64>,
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<&'a Movie>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<'a> {
    pub page: u32,
    pub results: Vec<&'a Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_keeps_unknown_fields_and_nulls() {
        let value = json!({
            "id": 7,
            "title": null,
            "overview": "A heist.",
            "vote_average": 7.5,
            "genre_ids": [18, 80]
        });
        let movie: Movie = serde_json::from_value(value.clone()).expect("movie deserialize");
        assert_eq!(movie.id(), 7);
        assert_eq!(movie.title(), None);
        assert_eq!(movie.original_title(), None);
        assert_eq!(movie.overview(), Some("A heist."));
        assert_eq!(serde_json::to_value(&movie).unwrap(), value);
    }

    #[test]
    fn movie_echoes_keys_in_source_order() {
        let raw = r#"{"title":"Heat","id":949,"overview":null,"adult":false}"#;
        let movie: Movie = serde_json::from_str(raw).expect("movie deserialize");
        assert_eq!(movie.id(), 949);
        assert_eq!(serde_json::to_string(&movie).unwrap(), raw);
    }

    #[test]
    fn movie_requires_integer_id() {
        let result = serde_json::from_value::<Movie>(json!({ "id": "seven", "title": "x" }));
        assert!(result.is_err());
        let result = serde_json::from_value::<Movie>(json!({ "title": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn pages_document_reads_camel_case_movie_ids() {
        let doc: PagesDocument = serde_json::from_value(json!({
            "pages": {
                "name": "Favourites",
                "favorite_count": 3,
                "page_list": [
                    { "page": 1, "movieIds": [10, 20] },
                    { "page": 4, "movieIds": [] }
                ]
            }
        }))
        .expect("pages deserialize");
        assert_eq!(doc.pages.name.as_deref(), Some("Favourites"));
        assert_eq!(doc.pages.description, None);
        assert_eq!(doc.pages.page_list.len(), 2);
        assert_eq!(doc.pages.page_list[0].movie_ids, vec![10, 20]);
        assert!(doc.pages.page_list[1].movie_ids.is_empty());
    }
}
