//! # 普通多帧 XYZ 格式写出
//!
//! ## 格式说明
//! ```text
//!      2
//!  i = 0, E = -10.5
//! H 0.0 0.0 0.0
//! O 0.96 0.0 0.0
//!      3
//!  i = 1, E = -17.25
//! ...
//! ```
//! 原子数行的前导空格只是排版，读取时不依赖。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `models/frame.rs`

use crate::models::FrameCollection;

/// 将帧集合转换为普通 XYZ 字符串
///
/// 帧集合由 `frames::build` 产生，坐标长度已在类型层面保证。
pub fn to_xyz_string(frames: &FrameCollection) -> String {
    let mut result = String::new();

    for frame in &frames.frames {
        result.push_str(&format!("     {}\n", frame.atom_count()));
        result.push_str(&format!(" i = {}, E = {}\n", frame.index, frame.energy));

        for atom in &frame.atoms {
            let [x, y, z] = &atom.position;
            result.push_str(&format!("{} {} {} {}\n", atom.species, x, y, z));
        }
    }

    result
}
