pub mod data_json;
pub mod uid_value;

pub use data_json::DataJson;
pub use uid_value::UidValue;
