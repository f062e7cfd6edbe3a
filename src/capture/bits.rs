//! 位域提取
//!
//! "前 N 位"指最高的 N 位，右移后得到 N 位整数；"后 N 位"指最低的 N 位（掩码）。
//! 标志位编号约定：最低位为 bit 0。

fn first_bits(value: u32, width: u32, n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    let n = n.min(width);
    (value >> (width - n)) & mask(n)
}

fn last_bits(value: u32, n: u32) -> u32 {
    value & mask(n)
}

fn mask(n: u32) -> u32 {
    if n >= 32 { u32::MAX } else { (1u32 << n) - 1 }
}

/// 取一个字节的前 `n` 位（`n > 8` 按 8 处理）
pub fn first_n_bits(value: u8, n: u32) -> u8 {
    first_bits(value as u32, 8, n) as u8
}

/// 取一个字节的后 `n` 位（`n > 8` 按 8 处理）
pub fn last_n_bits(value: u8, n: u32) -> u8 {
    last_bits(value as u32, n.min(8)) as u8
}

/// 取一个 16 位字的前 `n` 位
pub fn first_n_bits_u16(value: u16, n: u32) -> u16 {
    first_bits(value as u32, 16, n) as u16
}

/// 取一个 16 位字的后 `n` 位
pub fn last_n_bits_u16(value: u16, n: u32) -> u16 {
    last_bits(value as u32, n.min(16)) as u16
}

/// 检查第 `bit` 位（LSB = bit 0）是否置位
pub fn bit_set(value: u8, bit: u32) -> bool {
    bit < 8 && (value >> bit) & 1 == 1
}
