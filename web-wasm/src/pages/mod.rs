pub mod add_face;
pub mod gallery;
pub mod recognize;
