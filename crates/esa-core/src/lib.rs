pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::EsaApi;
pub use types::{NewPost, PostPatch, PostQuery};
