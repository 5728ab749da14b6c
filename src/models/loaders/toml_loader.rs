use crate::error::{AppResult, FileError};
use crate::models::sheet::ExamSheet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载一个考试表
pub async fn load_sheet(toml_file_path: &Path) -> AppResult<ExamSheet> {
    let path_str = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path_str.clone(),
            source,
        })?;

    let mut sheet: ExamSheet =
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path_str.clone(),
            source,
        })?;

    // 设置文件路径
    sheet.file_path = Some(path_str);

    Ok(sheet)
}

/// 从文件夹中加载所有考试表，按文件名排序
///
/// 单个文件解析失败只记录警告，不影响其他文件
pub async fn load_all_sheets(folder_path: &str) -> AppResult<Vec<ExamSheet>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: folder_path.to_string(),
            source,
        })?;

    let mut toml_files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| FileError::ReadFailed {
            path: folder_path.to_string(),
            source,
        })?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut sheets = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_sheet(&path).await {
            Ok(sheet) => {
                tracing::info!("成功加载 {} 个题目", sheet.questions.len());
                sheets.push(sheet);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(sheets)
}
