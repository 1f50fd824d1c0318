//! 評価履歴
//!
//! セッション中の評価結果を新しい順に保持する。
//! 各エントリには安定したIDを振り、選択状態はIDで参照する
//! （インデックスや参照を持たないので、将来削除を入れても宙に浮かない）。

use crate::types::EvaluationResult;

/// 履歴エントリID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 履歴エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub result: EvaluationResult,
}

/// 評価履歴（新しい順・重複排除なし）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に追加してIDを返す
    pub fn push_front(&mut self, result: EvaluationResult) -> EntryId {
        self.next_id += 1;
        let id = EntryId(self.next_id);
        self.entries.insert(0, HistoryEntry { id, result });
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// 表示上の位置（0 = 最新）
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// 表示上の位置からエントリを取得（0 = 最新）
    pub fn at(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// エクスポート用に結果を表示順で複製
    pub fn results(&self) -> Vec<EvaluationResult> {
        self.entries.iter().map(|e| e.result.clone()).collect()
    }

    /// 履歴一覧の見出し
    ///
    /// 候補者名がなければ古い順の通し番号で「結果 N」とする。
    pub fn display_label(&self, index: usize) -> String {
        match self.entries.get(index) {
            Some(entry) => match entry.result.candidate_identifier() {
                Some(name) => name.to_string(),
                None => format!("結果 {}", self.entries.len() - index),
            },
            None => String::new(),
        }
    }
}
