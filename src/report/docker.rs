use crate::model::{DockerReport, FileRecord};

/// Files whose name mentions docker, in any case.
pub fn find_docker_files(records: &[FileRecord]) -> DockerReport {
    let files: Vec<String> = records
        .iter()
        .filter(|r| r.name.to_lowercase().contains("docker"))
        .map(|r| r.name.clone())
        .collect();
    DockerReport {
        count: files.len(),
        files,
    }
}
