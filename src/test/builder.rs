use crate::Tag;

/// Writes raw NBT bytes for tests. Nothing here checks that the result is
/// valid, which is what lets tests build truncated or malformed input.
#[derive(Default)]
pub struct Builder {
    payload: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, t: Tag) -> Self {
        self.payload.push(t as u8);
        self
    }

    /// A u16 length then the UTF-8 bytes. Also used for string payloads.
    pub fn name(self, name: &str) -> Self {
        self.raw_str_len(name.len()).raw_bytes(name.as_bytes())
    }

    pub fn start_compound(self, name: &str) -> Self {
        self.tag(Tag::Compound).name(name)
    }

    pub fn end_compound(self) -> Self {
        self.tag(Tag::End)
    }

    /// Marks where an unnamed compound inside a list starts. Writes nothing.
    pub fn start_anon_compound(self) -> Self {
        self
    }

    pub fn start_list(self, name: &str, element_tag: Tag, size: i32) -> Self {
        self.tag(Tag::List)
            .name(name)
            .tag(element_tag)
            .int_payload(size)
    }

    pub fn byte(self, name: &str, b: i8) -> Self {
        self.tag(Tag::Byte).name(name).raw_bytes(&[b as u8])
    }

    pub fn short(self, name: &str, n: i16) -> Self {
        self.tag(Tag::Short).name(name).short_payload(n)
    }

    pub fn int(self, name: &str, n: i32) -> Self {
        self.tag(Tag::Int).name(name).int_payload(n)
    }

    pub fn long(self, name: &str, n: i64) -> Self {
        self.tag(Tag::Long).name(name).long_payload(n)
    }

    pub fn float(self, name: &str, n: f32) -> Self {
        self.tag(Tag::Float).name(name).raw_bytes(&n.to_be_bytes())
    }

    pub fn double(self, name: &str, n: f64) -> Self {
        self.tag(Tag::Double).name(name).double_payload(n)
    }

    pub fn string(self, name: &str, s: &str) -> Self {
        self.tag(Tag::String).name(name).name(s)
    }

    pub fn byte_array(self, name: &str, bs: &[i8]) -> Self {
        let bytes: Vec<u8> = bs.iter().map(|b| *b as u8).collect();
        self.tag(Tag::ByteArray)
            .name(name)
            .int_payload(bs.len() as i32)
            .raw_bytes(&bytes)
    }

    pub fn int_array(self, name: &str, ns: &[i32]) -> Self {
        let header = self
            .tag(Tag::IntArray)
            .name(name)
            .int_payload(ns.len() as i32);
        ns.iter().fold(header, |b, n| b.int_payload(*n))
    }

    pub fn long_array(self, name: &str, ns: &[i64]) -> Self {
        let header = self
            .tag(Tag::LongArray)
            .name(name)
            .int_payload(ns.len() as i32);
        ns.iter().fold(header, |b, n| b.long_payload(*n))
    }

    pub fn short_payload(self, n: i16) -> Self {
        self.raw_bytes(&n.to_be_bytes())
    }

    pub fn int_payload(self, n: i32) -> Self {
        self.raw_bytes(&n.to_be_bytes())
    }

    pub fn long_payload(self, n: i64) -> Self {
        self.raw_bytes(&n.to_be_bytes())
    }

    pub fn double_payload(self, n: f64) -> Self {
        self.raw_bytes(&n.to_be_bytes())
    }

    /// A string length prefix on its own, for lengths that disagree with the
    /// bytes that follow.
    pub fn raw_str_len(self, len: usize) -> Self {
        let len = u16::try_from(len).expect("test string longer than u16");
        self.raw_bytes(&len.to_be_bytes())
    }

    pub fn raw_bytes(mut self, bs: &[u8]) -> Self {
        self.payload.extend_from_slice(bs);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.payload
    }
}
