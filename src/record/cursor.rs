/// A bounds-checked cursor over one comma-delimited line.
///
/// The cursor borrows the line and advances an index; fields are read in
/// place with no intermediate allocation. The capability set is
/// deliberately narrow: read a field, advance past a separator. All
/// operations stop at the end of the line rather than reading past it.
#[derive(Debug)]
pub struct FieldCursor<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    /// Position the cursor at the start of a line.
    pub fn new(line: &'a str) -> Self {
        Self { data: line, pos: 0 }
    }

    /// Current byte offset into the line.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once the cursor has consumed the whole line.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Advance past the current field and its trailing separator.
    pub fn skip_field(&mut self) {
        let bytes = self.data.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] != b',' {
            self.pos += 1;
        }
        if self.pos < bytes.len() {
            self.pos += 1;
        }
    }

    /// Borrow the current field without consuming it.
    fn peek_field(&self) -> &'a str {
        let bytes = self.data.as_bytes();
        let mut end = self.pos;
        while end < bytes.len() && bytes[end] != b',' {
            end += 1;
        }
        &self.data[self.pos..end]
    }

    /// Parse the current field as a signed integer and consume it.
    ///
    /// Manual digit accumulation with an optional leading minus sign. A
    /// field with no digits yields 0; digits followed by stray characters
    /// yield the value of the leading digit run; a digit run too long for
    /// an `i64` wraps rather than failing the row. The original data
    /// source does not distinguish a true zero from an unparseable id, so
    /// neither does this parser.
    pub fn parse_int(&mut self) -> i64 {
        let bytes = self.data.as_bytes();

        let neg = self.pos < bytes.len() && bytes[self.pos] == b'-';
        if neg {
            self.pos += 1;
        }

        let mut value: i64 = 0;
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            value = value
                .wrapping_mul(10)
                .wrapping_add(i64::from(bytes[self.pos] - b'0'));
            self.pos += 1;
        }

        self.skip_field();
        if neg { value.wrapping_neg() } else { value }
    }

    /// Parse the current field as a float and consume it.
    ///
    /// Returns `None` when the field is empty or not a valid number, which
    /// invalidates the whole row at the call site.
    pub fn parse_float(&mut self) -> Option<f64> {
        let field = self.peek_field();
        self.skip_field();
        field.parse::<f64>().ok()
    }

    /// Borrow the current field as text, truncated to `max_len` bytes, and
    /// consume it.
    ///
    /// Truncation is silent; the cut falls back to the nearest character
    /// boundary so the returned slice is always valid UTF-8.
    pub fn parse_text(&mut self, max_len: usize) -> &'a str {
        let field = self.peek_field();
        self.skip_field();

        if field.len() <= max_len {
            return field;
        }
        let mut end = max_len;
        while !field.is_char_boundary(end) {
            end -= 1;
        }
        &field[..end]
    }

    /// Extract the hour from a `YYYY-MM-DD HH:MM:SS` field and consume it.
    ///
    /// Scans forward to the space, then reads exactly two characters as
    /// decimal digits. If the field contains no space, or the line ends
    /// before two characters are available, the hour defaults to 0. The
    /// two characters are not validated as digits: a malformed timestamp
    /// produces a garbage hour rather than failing the row, and the
    /// aggregation step discards hours outside [0, 23].
    pub fn parse_hour(&mut self) -> i32 {
        let bytes = self.data.as_bytes();

        let mut probe = self.pos;
        while probe < bytes.len() && bytes[probe] != b' ' && bytes[probe] != b',' {
            probe += 1;
        }

        let hour = if probe + 2 < bytes.len() && bytes[probe] == b' ' {
            let tens = i32::from(bytes[probe + 1]) - i32::from(b'0');
            let ones = i32::from(bytes[probe + 2]) - i32::from(b'0');
            tens * 10 + ones
        } else {
            0
        };

        self.skip_field();
        hour
    }
}
