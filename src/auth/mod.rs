//! Bearer-token access control shared by every authenticated route.

pub mod extractors;
pub mod middleware;
pub mod token;

pub use extractors::AuthenticatedAccount;
pub use middleware::AuthMiddleware;
pub use token::{Claims, JwtKeys};
