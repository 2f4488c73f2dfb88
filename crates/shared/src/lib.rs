pub mod domain;
pub mod error;
pub mod list_model;
pub mod protocol;
pub mod settings;

pub use domain::{Row, RowList, Title};
pub use error::ListError;
pub use list_model::RowListModel;
pub use protocol::{ChangeHint, ListUpdate, RowListView};
pub use settings::Settings;
