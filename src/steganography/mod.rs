//! # 隐写算法
//!
//! * `pvd` - 像素值差分，核心算法
//! * `lsb` - 位平面替换
//! * `bitplane` - 位平面图像嵌入与渲染

pub mod bitplane;
pub mod lsb;
pub mod pvd;
pub mod range_table;
pub mod scan;
