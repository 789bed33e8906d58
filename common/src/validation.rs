//! 選択ファイルの検証
//!
//! ネットワーク送信前に、MIMEタイプとサイズだけを確認する

use crate::error::ValidationError;

/// アップロード上限 (4 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 4 * 1024 * 1024;

/// 宣言されたMIMEタイプとサイズを検証
///
/// ブラウザではファイルを読み込む前にこれを呼ぶ
pub fn validate_image(media_type: &str, size: u64) -> Result<(), ValidationError> {
    if !media_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            media_type: media_type.to_string(),
        });
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}
