use crate::utils::CCStr;

/// Message shown in place of rows when a page holds no record.
pub const NO_RECORDS: &str = "No records found";

/// Number of placeholder rows drawn while the first page is loading.
const PLACEHOLDER_ROWS: usize = 3;

/// Content of a table body. Each new value replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<R> {
    Loading,
    Rows(Vec<R>),
    Empty,
    Error(CCStr),
}

impl<R> Default for TableBody<R> {
    fn default() -> Self {
        Self::Loading
    }
}

/// One line of a rendered table body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyRow<'a, R> {
    /// A record, with its zero-based position in the page
    Record { index: usize, record: &'a R },
    /// A skeleton line while nothing has been fetched yet
    Placeholder,
    /// A single full-width line carrying a message
    Message { text: &'a str, is_error: bool },
}

impl<R> TableBody<R> {
    pub fn from_items(items: Vec<R>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Rows(items)
        }
    }

    pub fn records(&self) -> &[R] {
        match self {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TableBody::Error(_))
    }

    /// Lines to draw, in fetch order.
    ///
    /// `Empty` and `Error` always produce exactly one message line.
    pub fn rows(&self) -> Vec<BodyRow<'_, R>> {
        match self {
            TableBody::Loading => (0..PLACEHOLDER_ROWS).map(|_| BodyRow::Placeholder).collect(),
            TableBody::Rows(records) => records
                .iter()
                .enumerate()
                .map(|(index, record)| BodyRow::Record { index, record })
                .collect(),
            TableBody::Empty => vec![BodyRow::Message {
                text: NO_RECORDS,
                is_error: false,
            }],
            TableBody::Error(msg) => vec![BodyRow::Message {
                text: msg.as_ref(),
                is_error: true,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_fetch_order() {
        let body = TableBody::from_items(vec!["c", "a", "b"]);
        let rendered: Vec<_> = body
            .rows()
            .into_iter()
            .map(|row| match row {
                BodyRow::Record { index, record } => (index, *record),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(rendered, vec![(0, "c"), (1, "a"), (2, "b")]);
    }

    #[test]
    fn empty_page_renders_single_message() {
        let body = TableBody::<u32>::from_items(vec![]);
        assert_eq!(body, TableBody::Empty);
        assert_eq!(
            body.rows(),
            vec![BodyRow::Message {
                text: NO_RECORDS,
                is_error: false
            }]
        );
    }

    #[test]
    fn error_renders_single_error_row() {
        let body = TableBody::<u32>::Error(CCStr::from("network error: timeout"));
        assert_eq!(
            body.rows(),
            vec![BodyRow::Message {
                text: "network error: timeout",
                is_error: true
            }]
        );
        assert!(body.records().is_empty());
    }

    #[test]
    fn rendering_is_idempotent() {
        let body = TableBody::from_items(vec![1, 2, 3]);
        assert_eq!(body.rows(), body.rows());
        assert_eq!(body.clone().rows(), body.rows());
    }
}
