pub mod authorizer;
pub mod scope;
pub mod verifier;

pub use authorizer::{
    AuthorizationDecision, AuthorizationRequest, AuthorizeError, RequestAuthorizer,
    ResolverContext,
};
pub use verifier::TokenVerifier;
