use crate::core::version::{sort_versions, VersionOrder};
use crate::domain::model::VersionEntry;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Modules of one version directory, alphabetically.
pub async fn list_modules<S: Storage>(storage: &S, version: &str) -> Result<Vec<String>> {
    let mut modules: Vec<String> = storage
        .list_dirs(version)
        .await?
        .into_iter()
        .filter(|name| !is_hidden(name))
        .collect();
    modules.sort();
    Ok(modules)
}

/// Every version under the output root with its modules. Versions without
/// modules are kept with an empty list.
pub async fn aggregate<S: Storage>(storage: &S, order: VersionOrder) -> Result<Vec<VersionEntry>> {
    let mut versions: Vec<String> = storage
        .list_dirs("")
        .await?
        .into_iter()
        .filter(|name| !is_hidden(name))
        .collect();
    sort_versions(&mut versions, order);

    let mut entries = Vec::with_capacity(versions.len());
    for version in versions {
        let modules = list_modules(storage, &version).await?;
        tracing::debug!("Version {} has {} modules", version, modules.len());
        entries.push(VersionEntry { version, modules });
    }
    Ok(entries)
}
