pub mod ids;
pub mod operator;

pub use ids::{IdPath, IdsPath};
pub use operator::{operator_id_from_headers, Operator, OPERATOR_HEADER};
