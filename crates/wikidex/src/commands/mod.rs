//! CLI command implementations.

pub(crate) mod breadcrumb;
pub(crate) mod build;

pub(crate) use breadcrumb::BreadcrumbArgs;
pub(crate) use build::BuildArgs;
