//! Common types shared across the gs-viewer workspace.

pub mod bbox;
pub mod datatype;
pub mod error;
pub mod layer;
pub mod operator;

pub use bbox::BoundingBox;
pub use datatype::DataType;
pub use error::{GsError, GsResult};
pub use layer::{Attribute, LayerInfo, ParamDataType, ServiceKind, ViewParam};
pub use operator::Operator;
