use crate::error::{FetchError, FetchResult};
use crate::models::learning_set::LearningSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载学习集
pub async fn load_learning_set(toml_file_path: &Path) -> FetchResult<LearningSet> {
    let display = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| FetchError::io(&display, e))?;

    let set: LearningSet = toml::from_str(&content).map_err(|e| FetchError::parse(&display, e))?;

    set.ensure_paired(&display, None)?;

    Ok(set.with_file_path(display))
}

/// 列出文件夹中所有 TOML 文件（按文件名排序）
pub async fn list_toml_files(folder_path: &Path) -> FetchResult<Vec<PathBuf>> {
    let display = folder_path.display().to_string();
    let mut entries = fs::read_dir(folder_path)
        .await
        .map_err(|e| FetchError::io(&display, e))?;

    let mut toml_files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FetchError::io(&display, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    Ok(toml_files)
}

/// 从文件夹中加载所有学习集
///
/// 解析失败的文件只记录警告并跳过
pub async fn load_all_learning_sets(folder_path: &Path) -> FetchResult<Vec<LearningSet>> {
    let mut sets = Vec::new();

    for path in list_toml_files(folder_path).await? {
        tracing::debug!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_learning_set(&path).await {
            Ok(set) => {
                tracing::debug!(
                    "成功加载学习集 {} ({} 道题目)",
                    set.id(),
                    set.question_set.questions.len()
                );
                sets.push(set);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(sets)
}
