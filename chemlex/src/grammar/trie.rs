//! 字句トークンの基数トライ
//!
//! 共通接頭辞を共有ノードにまとめ、各ノードには共有されない残りの文字列を
//! 保持します。順方向の接頭辞探索と、逆向きに格納したトークンによる
//! 右から左への探索の両方を提供します。
//!
//! 大文字小文字の区別は呼び出し側の責任です。字句トークンとの照合には
//! 小文字化済みのテキストを渡してください。

/// トライのノード
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// 親から辿ったときにこのノードが消費する文字列
    label: Box<str>,
    /// ここで終わるトークンが存在するか
    is_token: bool,
    /// 先頭文字でソートされた子ノード
    children: Vec<(char, usize)>,
}

impl TrieNode {
    #[inline(always)]
    fn child(&self, c: char) -> Option<usize> {
        self.children
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|i| self.children[i].1)
    }
}

/// 基数トライ（圧縮トライ）
///
/// 一致長はバイト単位で返されます。入力テキストの文字境界上にあることが
/// 保証されるため、そのままスライスに使用できます。
#[derive(Debug, Clone)]
pub struct RadixTrie {
    nodes: Vec<TrieNode>,
    num_tokens: usize,
}

impl Default for RadixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixTrie {
    /// 空のトライを作成します。
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            num_tokens: 0,
        }
    }

    /// トークン列から順方向に読むトライを構築します。
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for token in tokens {
            trie.insert(token.as_ref());
        }
        trie
    }

    /// トークン列から右から左へ読むトライを構築します。
    ///
    /// 各トークンは文字単位で反転して格納され、
    /// [`find_lengths_of_matches_reading_right_to_left`](Self::find_lengths_of_matches_reading_right_to_left)
    /// で照合します。
    pub fn from_tokens_reversed<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for token in tokens {
            let reversed: String = token.as_ref().chars().rev().collect();
            trie.insert(&reversed);
        }
        trie
    }

    /// 登録されているトークンの数
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    /// トークンを1つ挿入します。既に登録済みの場合は何もしません。
    pub fn insert(&mut self, token: &str) {
        let mut node = 0;
        let mut rest = token;
        loop {
            let Some(c) = rest.chars().next() else {
                if !self.nodes[node].is_token {
                    self.nodes[node].is_token = true;
                    self.num_tokens += 1;
                }
                return;
            };
            let pos = self.nodes[node]
                .children
                .binary_search_by_key(&c, |&(k, _)| k);
            match pos {
                Err(pos) => {
                    let new_idx = self.push_node(rest, true);
                    self.nodes[node].children.insert(pos, (c, new_idx));
                    self.num_tokens += 1;
                    return;
                }
                Ok(pos) => {
                    let child = self.nodes[node].children[pos].1;
                    let common = common_prefix_len(&self.nodes[child].label, rest);
                    if common < self.nodes[child].label.len() {
                        // Splits the child so that the shared part becomes its own node.
                        let label = std::mem::take(&mut self.nodes[child].label);
                        let (shared, tail) = label.split_at(common);
                        let tail_first = tail.chars().next().unwrap_or_default();
                        self.nodes[child].label = tail.into();
                        let mid = self.push_node(shared, false);
                        self.nodes[mid].children.push((tail_first, child));
                        self.nodes[node].children[pos].1 = mid;
                        node = mid;
                    } else {
                        node = child;
                    }
                    rest = &rest[common..];
                }
            }
        }
    }

    fn push_node(&mut self, label: &str, is_token: bool) -> usize {
        self.nodes.push(TrieNode {
            label: label.into(),
            is_token,
            children: vec![],
        });
        self.nodes.len() - 1
    }

    /// `text` の先頭から一致する全トークンの長さを返します。
    ///
    /// # 戻り値
    ///
    /// 一致したトークンの長さ（バイト単位）を昇順で返します。
    /// 一致がなければ`None`を返します。ルートがトークンの場合は`0`を含みます。
    pub fn find_lengths_of_matches(&self, text: &str) -> Option<Vec<usize>> {
        let mut lengths = vec![];
        if self.nodes[0].is_token {
            lengths.push(0);
        }
        let mut node = &self.nodes[0];
        let mut consumed = 0;
        while let Some(c) = text[consumed..].chars().next() {
            let Some(child) = node.child(c) else {
                break;
            };
            node = &self.nodes[child];
            if !text[consumed..].starts_with(&*node.label) {
                break;
            }
            consumed += node.label.len();
            if node.is_token {
                lengths.push(consumed);
            }
        }
        (!lengths.is_empty()).then_some(lengths)
    }

    /// `text` の末尾から左へ読んだときに一致する全トークンの長さを返します。
    ///
    /// このトライは[`from_tokens_reversed`](Self::from_tokens_reversed)で
    /// 構築されている必要があります。
    ///
    /// # 戻り値
    ///
    /// 末尾から数えた一致長（バイト単位）を昇順で返します。
    /// 一致がなければ`None`を返します。
    pub fn find_lengths_of_matches_reading_right_to_left(&self, text: &str) -> Option<Vec<usize>> {
        let mut lengths = vec![];
        if self.nodes[0].is_token {
            lengths.push(0);
        }
        let mut node = &self.nodes[0];
        let mut consumed = 0;
        while let Some(c) = text[..text.len() - consumed].chars().next_back() {
            let Some(child) = node.child(c) else {
                break;
            };
            node = &self.nodes[child];
            let mut haystack = text[..text.len() - consumed].chars().rev();
            if !node.label.chars().all(|lc| haystack.next() == Some(lc)) {
                break;
            }
            consumed += node.label.len();
            if node.is_token {
                lengths.push(consumed);
            }
        }
        (!lengths.is_empty()).then_some(lengths)
    }
}

/// 2つの文字列の共通接頭辞の長さ（バイト単位、文字境界上）
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i)
}
