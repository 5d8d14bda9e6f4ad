pub mod body;
pub mod request;
pub mod response;

pub use body::{FilePart, MultipartForm, RequestBody};
pub use request::ApiRequest;
pub use response::ApiResponse;
