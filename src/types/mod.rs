//! Values exchanged with the server: operations, variables, files and responses.

mod operation;
mod path;
mod response;
mod upload;
mod value;

pub use operation::Operation;
pub use path::VariablePath;
pub use response::{PathSegment, Pos, Response, ServerError};
pub use upload::Upload;
pub use value::{Value, Variables};
