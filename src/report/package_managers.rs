use crate::error::Result;
use crate::model::{FileRecord, PackageManagerReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::warn;

const BUILTIN_MARKERS: &[(&str, &str)] = &[
    ("package.json", "NPM"),
    ("package-lock.json", "NPM"),
    ("yarn.lock", "Yarn"),
    ("pnpm-lock.yaml", "pnpm"),
    ("bower.json", "Bower"),
    ("requirements.txt", "pip"),
    ("setup.py", "pip"),
    ("Pipfile", "Pipenv"),
    ("pyproject.toml", "Poetry"),
    ("poetry.lock", "Poetry"),
    ("environment.yml", "Conda"),
    ("Cargo.toml", "Cargo"),
    ("go.mod", "Go Modules"),
    ("Gemfile", "Bundler"),
    ("composer.json", "Composer"),
    ("pom.xml", "Maven"),
    ("build.gradle", "Gradle"),
    ("build.gradle.kts", "Gradle"),
    (".csproj", "NuGet"),
    ("packages.config", "NuGet"),
    ("Package.swift", "Swift Package Manager"),
    ("Podfile", "CocoaPods"),
    ("Cartfile", "Carthage"),
    ("pubspec.yaml", "Pub"),
    ("mix.exs", "Mix"),
    ("rebar.config", "Rebar3"),
    ("cabal.project", "Cabal"),
    ("stack.yaml", "Stack"),
    ("project.clj", "Leiningen"),
    ("deps.edn", "Clojure CLI"),
    ("build.sbt", "sbt"),
    ("conanfile.txt", "Conan"),
    ("vcpkg.json", "vcpkg"),
    ("DESCRIPTION", "CRAN"),
    ("cpanfile", "CPAN"),
];

/// Marker file name to package manager label.
///
/// Keys are compared against whole file names, so a key such as `.csproj`
/// only matches a file literally named `.csproj`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageManagerTable {
    markers: BTreeMap<String, String>,
}

impl PackageManagerTable {
    pub fn new(markers: BTreeMap<String, String>) -> Self {
        Self { markers }
    }

    /// Load a JSON object of `{"marker": "Label"}` pairs.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let table: Self = serde_json::from_str(&text)?;
        if table.is_empty() {
            warn!(
                "Marker table {} is empty, no package managers will be detected",
                path.display()
            );
        }
        Ok(table)
    }

    pub fn label_for(&self, file_name: &str) -> Option<&str> {
        self.markers.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for PackageManagerTable {
    fn default() -> Self {
        Self::new(
            BUILTIN_MARKERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

pub fn detect_package_managers(
    records: &[FileRecord],
    table: &PackageManagerTable,
) -> PackageManagerReport {
    let managers: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| table.label_for(&r.name))
        .collect();
    PackageManagerReport {
        managers: managers.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn named(names: &[&str]) -> Vec<FileRecord> {
        names.iter().map(|n| FileRecord::new(*n, *n, 1)).collect()
    }

    #[test]
    fn exact_name_match_only() {
        let table = PackageManagerTable::default();
        let report = detect_package_managers(
            &named(&["mypackage.json", "Cargo.toml.bak", "cargo.toml", "go.mod"]),
            &table,
        );
        assert_eq!(report.managers, ["Go Modules"]);
    }

    #[test]
    fn labels_are_deduplicated_and_sorted() {
        let table = PackageManagerTable::default();
        let report = detect_package_managers(
            &named(&["package.json", "Cargo.toml", "package-lock.json", "web/package.json"]),
            &table,
        );
        assert_eq!(report.managers, ["Cargo", "NPM"]);
    }

    #[test]
    fn extension_keys_match_literal_names_only() {
        let table = PackageManagerTable::default();
        assert!(detect_package_managers(&named(&["App.csproj"]), &table)
            .managers
            .is_empty());
        assert_eq!(
            detect_package_managers(&named(&[".csproj"]), &table).managers,
            ["NuGet"]
        );
    }

    #[test]
    fn empty_marker_file_loads_as_empty_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let table = PackageManagerTable::from_json_file(file.path()).unwrap();
        assert!(table.is_empty());
        assert!(detect_package_managers(&named(&["package.json"]), &table)
            .managers
            .is_empty());
    }

    #[test]
    fn table_loads_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"BUILD.bazel": "Bazel", "WORKSPACE": "Bazel"}}"#).unwrap();

        let table = PackageManagerTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let report = detect_package_managers(&named(&["WORKSPACE", "package.json"]), &table);
        assert_eq!(report.managers, ["Bazel"]);
    }
}
