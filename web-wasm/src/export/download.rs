//! ブラウザへのファイル保存
//!
//! Blob → オブジェクトURL → 一時的な <a download> をクリック。
//! オブジェクトURLは `ObjectUrl` の破棄時に解放される。

use candidate_eval_common::DownloadFile;
use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;

/// ダウンロードを開始
pub fn trigger_download(file: &DownloadFile) -> Result<(), String> {
    let blob = Blob::new_with_options(file.bytes.as_slice(), Some(file.content_type.as_str()));
    let url = ObjectUrl::from(blob);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document がありません")?;
    let body = document.body().ok_or("body がありません")?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("リンク作成失敗: {:?}", e))?
        .dyn_into()
        .map_err(|_| "リンク作成失敗".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);

    body.append_child(&anchor)
        .map_err(|e| format!("リンク追加失敗: {:?}", e))?;
    anchor.click();
    anchor.remove();

    drop(url);
    Ok(())
}
