pub mod lenient;
pub mod response;
pub mod scene;
