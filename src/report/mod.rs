pub mod commits;
pub mod contributors;
pub mod docker;
pub mod exec;
pub mod extensions;
pub mod output;
pub mod package_managers;

pub use commits::bucket_commits;
pub use contributors::{rank_contributors, DEFAULT_TOP};
pub use docker::find_docker_files;
pub use exec::{collect_insights, exec};
pub use extensions::aggregate_extensions;
pub use output::{output_json, output_report};
pub use package_managers::{detect_package_managers, PackageManagerTable};
