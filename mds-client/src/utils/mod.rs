pub mod jwt;
pub mod pagination;

pub use jwt::{AccessTokenClaims, decode_claims};
pub use pagination::{PartialPages, collect_pages};
