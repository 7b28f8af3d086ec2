// Module layout (Clean Architecture style)
// - bootstrap: env configuration and the dependency container
// - infrastructure: GitHub content API client and JSON file stores
// - presentation: HTTP handlers and routing
// - application: ports, codec/explorer/history services and use cases
// - domain: repository config, remote entries and upload records

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
