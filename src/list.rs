//! Per-list numbering and alignment state.

use serde::Serialize;

use crate::node::Node;

pub(crate) const BULLET: &str = "\u{2022}";

/// Bullets reserve the width of this many digits so they line up with
/// numbered prefixes.
const BULLET_DIGITS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Bullet,
}

/// Byte range of a finished list in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListRange {
    pub start: usize,
    pub end: usize,
}

/// State of one open list.
#[derive(Debug, Clone)]
pub struct ListContext {
    pub kind: ListKind,
    /// Open lists including this one.
    pub depth: u32,
    /// Number of the next item. Unused for bullet lists.
    pub counter: u64,
    /// Digits in the largest item number. Zero for bullet lists.
    pub digits: u32,
}

/// Pixel metrics used to lay out list prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct ListMetrics {
    pub base_font_size: u32,
    pub max_digit_width: u32,
    /// Indentation added by each nesting level.
    pub content_margin: u32,
    pub prefix_gap_width: u32,
    pub prefix_color: String,
}

/// Layout of one item's prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub text: String,
    /// Glyph slots the prefix reserves.
    pub digits: u32,
    /// Width of each slot.
    pub digit_width: u32,
    /// Where the item content starts.
    pub tab_location: u32,
    /// Left margin of the item's first line.
    pub indentation: u32,
}

impl Prefix {
    /// Total column width reserved for the prefix.
    pub fn width(&self) -> u32 {
        self.digits.saturating_mul(self.digit_width)
    }
}

/// The chain of open lists, innermost last.
///
/// Each entry's parent is the entry below it.
#[derive(Debug, Default)]
pub struct ListStack {
    open: Vec<ListContext>,
}

impl ListStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn current(&self) -> Option<&ListContext> {
        self.open.last()
    }

    /// Open a list with `item_count` direct items, numbered from `start`.
    pub fn enter(&mut self, kind: ListKind, start: u64, item_count: usize) {
        let depth = self.open.len() as u32 + 1;
        let digits = match kind {
            ListKind::Ordered => {
                let largest = start.saturating_add((item_count as u64).saturating_sub(1));
                count_digits(largest)
            }
            ListKind::Bullet => 0,
        };
        self.open.push(ListContext {
            kind,
            depth,
            counter: start,
            digits,
        });
    }

    pub fn leave(&mut self) -> Option<ListContext> {
        self.open.pop()
    }

    /// Compute the prefix of the next item of the innermost list and advance
    /// its counter.
    pub fn next_prefix(&mut self, metrics: &ListMetrics) -> Prefix {
        let margin = metrics.content_margin;
        let Some(list) = self.open.last_mut() else {
            return Prefix {
                text: String::new(),
                digits: BULLET_DIGITS,
                digit_width: metrics.max_digit_width,
                tab_location: margin,
                indentation: 0,
            };
        };
        let indentation = list.depth.saturating_mul(margin);

        match list.kind {
            ListKind::Ordered => {
                let text = format!("{}.", list.counter);
                list.counter = list.counter.saturating_add(1);
                // Room for the largest number plus the separator.
                let digits = list.digits + 1;
                Prefix {
                    text,
                    digits,
                    digit_width: metrics.max_digit_width,
                    tab_location: digits
                        .saturating_mul(metrics.max_digit_width)
                        .saturating_add(metrics.prefix_gap_width),
                    indentation,
                }
            }
            ListKind::Bullet => Prefix {
                text: BULLET.to_string(),
                digits: 1,
                digit_width: BULLET_DIGITS.saturating_mul(metrics.max_digit_width),
                tab_location: margin,
                indentation,
            },
        }
    }
}

/// Direct items of a list, counted before any of them renders.
pub fn count_items(children: &[Node]) -> usize {
    children
        .iter()
        .filter(|child| matches!(child, Node::ListItem { .. }))
        .count()
}

pub fn count_digits(mut n: u64) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
