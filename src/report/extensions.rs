use crate::model::{Extension, ExtensionStats, FileRecord};
use std::collections::HashMap;

/// File and line totals per extension, most common extension first.
pub fn aggregate_extensions(records: &[FileRecord]) -> Vec<ExtensionStats> {
    let mut groups: HashMap<&Extension, (u64, u64)> = HashMap::new();
    for record in records {
        let entry = groups.entry(&record.extension).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += record.line_count;
    }

    let mut stats: Vec<ExtensionStats> = groups
        .into_iter()
        .map(|(extension, (file_count, line_count))| ExtensionStats {
            extension: extension.clone(),
            file_count,
            line_count,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.file_count
            .cmp(&a.file_count)
            .then_with(|| a.extension.label().cmp(&b.extension.label()))
    });
    stats
}
