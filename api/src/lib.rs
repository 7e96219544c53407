// Module layout (Clean Architecture style)
// - bootstrap: configuration and shared services
// - infrastructure: Postgres repositories and token signing
// - presentation: HTTP routes and the GraphQL schema
// - application: viewer resolution, tagging rules and use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
mod test_support;
