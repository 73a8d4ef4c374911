pub mod search;
pub mod search_url;
pub mod suggest;

pub use search::*;
pub use search_url::*;
pub use suggest::*;
