pub mod csv_upload;
pub mod deck_name;
pub mod validated_json;

pub use csv_upload::CsvUpload;
pub use deck_name::DeckName;
pub use validated_json::ValidatedJson;
