// ---------------------------------------------------------------------------
// Layout descriptors
// ---------------------------------------------------------------------------

/// Row/column conventions of one known export format. The counterparty is an
/// ordered candidate list: the first column with content wins, so a layout
/// with a fallback column is plain data, not a special case.
#[derive(Debug)]
pub struct Layout {
    pub name: &'static str,
    pub row_delimiter: &'static str,
    pub column_delimiter: char,
    pub date_column: usize,
    pub amount_column: usize,
    pub counterparty_columns: &'static [usize],
}

impl Layout {
    pub fn split_rows<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split(self.row_delimiter)
    }

    pub fn split_columns<'a>(&self, row: &'a str) -> Vec<&'a str> {
        row.split(self.column_delimiter).collect()
    }
}

pub const LAYOUTS: &[Layout] = &[
    Layout {
        name: "nordea",
        // Nordea's TSV exports really separate rows with "\n\r", not "\r\n"
        row_delimiter: "\n\r",
        column_delimiter: '\t',
        date_column: 0,
        amount_column: 3,
        // payee column, then the transaction-type column when payee is blank
        counterparty_columns: &[4, 7],
    },
    Layout {
        name: "op",
        row_delimiter: "\n",
        column_delimiter: ';',
        date_column: 0,
        amount_column: 2,
        counterparty_columns: &[5],
    },
];

pub fn by_name(name: &str) -> Option<&'static Layout> {
    LAYOUTS.iter().find(|l| l.name == name)
}

/// Pick the layout a raw export uses. OP packs several semicolon-separated
/// columns into every newline-terminated row, so more semicolons than
/// newlines reads as "op"; everything else, including empty input, reads as
/// "nordea".
pub fn detect(text: &str) -> &'static Layout {
    let semicolons = text.matches(';').count();
    let newlines = text.matches('\n').count();
    if semicolons > newlines {
        &LAYOUTS[1] // op
    } else {
        &LAYOUTS[0] // nordea
    }
}
