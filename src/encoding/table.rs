//! Byte tables for the RFC 2396 unreserved set and hexadecimal octets.

const fn gen_hex_table() -> [u8; 512] {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut i = 0;
    let mut out = [0; 512];
    while i < 256 {
        out[i * 2] = HEX_DIGITS[i >> 4];
        out[i * 2 + 1] = HEX_DIGITS[i & 0b1111];
        i += 1;
    }
    out
}

/// Uppercase hex pairs for every octet, indexed by `byte * 2`.
pub(crate) static HEX_TABLE: &[u8; 512] = &gen_hex_table();

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xFF; 256];
    let shift = (hi as u8) * 4;

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

static OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
static OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a pair of hex characters into an octet, or `None` if either
/// character is non-hexadecimal.
pub(crate) fn decode_octet(mut hi: u8, mut lo: u8) -> Option<u8> {
    hi = OCTET_TABLE_HI[hi as usize];
    lo = OCTET_TABLE_LO[lo as usize];
    if hi & 1 == 0 && lo & 0x80 == 0 {
        Some(hi | lo)
    } else {
        None
    }
}

/// A table determining the bytes that may stay unencoded.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Table {
    arr: [bool; 256],
}

impl Table {
    /// Generates a table that allows exactly the given bytes.
    pub(crate) const fn gen(mut bytes: &[u8]) -> Table {
        let mut arr = [false; 256];
        while let [cur, rem @ ..] = bytes {
            arr[*cur as usize] = true;
            bytes = rem;
        }
        Table { arr }
    }

    /// Returns `true` if the byte is allowed by the table.
    pub(crate) const fn allows(&self, byte: u8) -> bool {
        self.arr[byte as usize]
    }
}

/// ALPHA / DIGIT / "_" / "-" / "!" / "." / "~" / "'" / "(" / ")" / "*"
pub(crate) static UNRESERVED: &Table = &Table::gen(
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-!.~'()*",
);
