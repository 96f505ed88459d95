//! # Contract ABI Codec
//!
//! Solidity ABI encoding for the escrow contract's calls and decoding of its
//! return data. Only the types the contract uses are supported: `uint256`,
//! `address`, `bool`, `string`, dynamic arrays and tuples.

use sha3::{Digest, Keccak256};
use shared_types::{Address, U256};
use thiserror::Error;

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// Contract function signatures.
pub mod signatures {
    /// `jobCounter() -> uint256`
    pub const JOB_COUNTER: &str = "jobCounter()";
    /// `applicationFeeWei() -> uint256`
    pub const APPLICATION_FEE: &str = "applicationFeeWei()";
    /// `getJobPreview(uint256) -> (JobPreview, address[])`
    pub const GET_JOB_PREVIEW: &str = "getJobPreview(uint256)";
    /// `getApplications(uint256) -> (address[], string[], uint256[])`
    pub const GET_APPLICATIONS: &str = "getApplications(uint256)";
    /// `postJob(string,string) payable`
    pub const POST_JOB: &str = "postJob(string,string)";
    /// `applyToJob(uint256,string,uint256) payable`
    pub const APPLY_TO_JOB: &str = "applyToJob(uint256,string,uint256)";
    /// `hireApplicant(uint256,address)`
    pub const HIRE_APPLICANT: &str = "hireApplicant(uint256,address)";
    /// `submitWork(uint256)`
    pub const SUBMIT_WORK: &str = "submitWork(uint256)";
    /// `approveWork(uint256)`
    pub const APPROVE_WORK: &str = "approveWork(uint256)";
    /// `cancelJob(uint256)`
    pub const CANCEL_JOB: &str = "cancelJob(uint256)";
}

/// ABI decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Read past the end of the return data.
    #[error("out of bounds: need {needed} bytes at offset {offset}, have {len}")]
    OutOfBounds {
        /// Start of the read.
        offset: usize,
        /// Bytes requested.
        needed: usize,
        /// Bytes available.
        len: usize,
    },

    /// Address word has non-zero high bytes.
    #[error("invalid address word at offset {0}")]
    InvalidAddress(usize),

    /// Bool word is neither 0 nor 1.
    #[error("invalid bool word at offset {0}")]
    InvalidBool(usize),

    /// String bytes are not UTF-8.
    #[error("invalid utf-8 string at offset {0}")]
    InvalidUtf8(usize),

    /// Numeric word does not fit the target type.
    #[error("value at offset {0} overflows")]
    Overflow(usize),

    /// Parallel arrays differ in length.
    #[error("array length mismatch: {0}")]
    LengthMismatch(String),
}

/// Value to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `uint256`
    Uint(U256),
    /// `address`
    Address(Address),
    /// `bool`
    Bool(bool),
    /// `string`
    String(String),
    /// `T[]`
    Array(Vec<Token>),
    /// `(T1, T2, ...)`
    Tuple(Vec<Token>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        match self {
            Token::String(_) | Token::Array(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
            _ => false,
        }
    }
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Selector followed by the encoded arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode_tokens(args));
    out
}

/// Head/tail encoding of a token sequence.
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens
        .iter()
        .map(|t| if t.is_dynamic() { WORD } else { encode_token(t).len() })
        .sum();

    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
            tail.extend(encode_token(token));
        } else {
            head.extend(encode_token(token));
        }
    }
    head.extend(tail);
    head
}

fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Uint(value) => uint_word(*value).to_vec(),
        Token::Address(address) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(address.as_bytes());
            word.to_vec()
        }
        Token::Bool(flag) => uint_word(U256::from(u8::from(*flag))).to_vec(),
        Token::String(text) => {
            let bytes = text.as_bytes();
            let mut out = uint_word(U256::from(bytes.len())).to_vec();
            out.extend_from_slice(bytes);
            out.resize(WORD + padded_len(bytes.len()), 0);
            out
        }
        Token::Array(items) => {
            let mut out = uint_word(U256::from(items.len())).to_vec();
            out.extend(encode_tokens(items));
            out
        }
        Token::Tuple(items) => encode_tokens(items),
    }
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Bounds-checked reader over ABI return data.
///
/// Offsets are absolute byte positions; dynamic values are located by the
/// offset word stored in their head slot, relative to the enclosing block.
pub struct AbiDecoder<'a> {
    data: &'a [u8],
}

impl<'a> AbiDecoder<'a> {
    /// Wrap raw return data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn slice(&self, offset: usize, needed: usize) -> Result<&'a [u8], AbiError> {
        let end = offset.checked_add(needed).ok_or(AbiError::Overflow(offset))?;
        self.data.get(offset..end).ok_or(AbiError::OutOfBounds {
            offset,
            needed,
            len: self.data.len(),
        })
    }

    /// `uint256` at `offset`.
    pub fn uint(&self, offset: usize) -> Result<U256, AbiError> {
        Ok(U256::from_big_endian(self.slice(offset, WORD)?))
    }

    /// `uint256` at `offset` that must fit a `u64`.
    pub fn u64(&self, offset: usize) -> Result<u64, AbiError> {
        let value = self.uint(offset)?;
        if value > U256::from(u64::MAX) {
            return Err(AbiError::Overflow(offset));
        }
        Ok(value.as_u64())
    }

    /// Offset or length word; must point inside the data.
    pub fn offset(&self, offset: usize) -> Result<usize, AbiError> {
        let value = self.uint(offset)?;
        if value > U256::from(self.data.len()) {
            return Err(AbiError::Overflow(offset));
        }
        Ok(value.as_usize())
    }

    /// `address` at `offset`.
    pub fn address(&self, offset: usize) -> Result<Address, AbiError> {
        let word = self.slice(offset, WORD)?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(AbiError::InvalidAddress(offset));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Ok(Address::from_bytes(bytes))
    }

    /// `bool` at `offset`.
    pub fn boolean(&self, offset: usize) -> Result<bool, AbiError> {
        match self.uint(offset)? {
            v if v.is_zero() => Ok(false),
            v if v == U256::one() => Ok(true),
            _ => Err(AbiError::InvalidBool(offset)),
        }
    }

    /// `string` whose length word starts at `offset`.
    pub fn string(&self, offset: usize) -> Result<String, AbiError> {
        let len = self.offset(offset)?;
        let bytes = self.slice(offset + WORD, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8(offset))
    }

    /// `address[]` whose length word starts at `offset`.
    pub fn address_array(&self, offset: usize) -> Result<Vec<Address>, AbiError> {
        let len = self.offset(offset)?;
        (0..len)
            .map(|i| self.address(offset + WORD + i * WORD))
            .collect()
    }

    /// `uint256[]` whose length word starts at `offset`.
    pub fn uint_array(&self, offset: usize) -> Result<Vec<U256>, AbiError> {
        let len = self.offset(offset)?;
        (0..len)
            .map(|i| self.uint(offset + WORD + i * WORD))
            .collect()
    }

    /// `string[]` whose length word starts at `offset`.
    ///
    /// Element offsets are relative to the first word after the length.
    pub fn string_array(&self, offset: usize) -> Result<Vec<String>, AbiError> {
        let len = self.offset(offset)?;
        let base = offset + WORD;
        (0..len)
            .map(|i| {
                let rel = self.offset(base + i * WORD)?;
                self.string(base + rel)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn test_known_selectors() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_encode_static_call() {
        let data = encode_call(signatures::SUBMIT_WORK, &[Token::Uint(U256::from(7u64))]);
        assert_eq!(data.len(), 4 + WORD);
        assert_eq!(&data[..4], &selector(signatures::SUBMIT_WORK));
        assert_eq!(data[4 + 31], 7);
    }

    #[test]
    fn test_encode_string_layout() {
        // applyToJob(3, "hi", 5): head = [3, 0x60, 5], tail = [2, "hi" padded]
        let data = encode_tokens(&[
            Token::Uint(U256::from(3u64)),
            Token::String("hi".to_string()),
            Token::Uint(U256::from(5u64)),
        ]);
        assert_eq!(data.len(), 5 * WORD);
        let dec = AbiDecoder::new(&data);
        assert_eq!(dec.u64(0).unwrap(), 3);
        assert_eq!(dec.offset(WORD).unwrap(), 0x60);
        assert_eq!(dec.u64(2 * WORD).unwrap(), 5);
        assert_eq!(dec.string(0x60).unwrap(), "hi");
    }

    #[test]
    fn test_decode_preview_shaped_payload() {
        let payload = encode_tokens(&[
            Token::Tuple(vec![
                Token::Uint(U256::from(3u64)),
                Token::Address(addr(0xAA)),
                Token::String("Build a landing page".to_string()),
                Token::Uint(U256::from(1_000u64)),
                Token::Bool(true),
                Token::Address(Address::ZERO),
                Token::Bool(false),
                Token::Bool(false),
            ]),
            Token::Array(vec![Token::Address(addr(0x01)), Token::Address(addr(0x02))]),
        ]);

        let dec = AbiDecoder::new(&payload);
        let base = dec.offset(0).unwrap();
        assert_eq!(dec.u64(base).unwrap(), 3);
        assert_eq!(dec.address(base + WORD).unwrap(), addr(0xAA));
        let title_at = base + dec.offset(base + 2 * WORD).unwrap();
        assert_eq!(dec.string(title_at).unwrap(), "Build a landing page");
        assert!(dec.boolean(base + 4 * WORD).unwrap());
        let applicants = dec.address_array(dec.offset(WORD).unwrap()).unwrap();
        assert_eq!(applicants, vec![addr(0x01), addr(0x02)]);
    }

    #[test]
    fn test_decode_string_array() {
        let payload = encode_tokens(&[Token::Array(vec![
            Token::String("first".to_string()),
            Token::String(String::new()),
            Token::String("a".repeat(40)),
        ])]);
        let dec = AbiDecoder::new(&payload);
        let strings = dec.string_array(dec.offset(0).unwrap()).unwrap();
        assert_eq!(strings, vec!["first".to_string(), String::new(), "a".repeat(40)]);
    }

    #[test]
    fn test_decoder_rejects_truncated_data() {
        let dec = AbiDecoder::new(&[0u8; 10]);
        assert!(matches!(dec.uint(0), Err(AbiError::OutOfBounds { .. })));
    }

    #[test]
    fn test_decoder_rejects_dirty_address_and_bool() {
        let mut word = [0u8; WORD];
        word[0] = 1;
        let dec = AbiDecoder::new(&word);
        assert_eq!(dec.address(0), Err(AbiError::InvalidAddress(0)));

        let mut word = [0u8; WORD];
        word[31] = 2;
        let dec = AbiDecoder::new(&word);
        assert_eq!(dec.boolean(0), Err(AbiError::InvalidBool(0)));
    }

    #[test]
    fn test_offset_beyond_data_rejected() {
        let data = uint_word(U256::from(10_000u64));
        let dec = AbiDecoder::new(&data);
        assert_eq!(dec.offset(0), Err(AbiError::Overflow(0)));
    }
}
