//! # 扫描顺序
//!
//! 以确定的顺序枚举图像中的每个坐标：按行或按列，线性或之字形。
//! 嵌入与提取必须使用完全相同的扫描顺序，否则解码出的数据毫无意义，
//! 而且没有任何校验能发现这一点。

use clap::ValueEnum;

/// 遍历图像的主方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Direction {
    /// 逐行，自上而下
    #[default]
    Row,
    /// 逐列，自左向右
    Column,
}

/// 四种扫描顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    #[default]
    RowLinear,
    RowZigzag,
    ColumnLinear,
    ColumnZigzag,
}

impl ScanOrder {
    pub fn new(direction: Direction, zigzag: bool) -> Self {
        match (direction, zigzag) {
            (Direction::Row, false) => ScanOrder::RowLinear,
            (Direction::Row, true) => ScanOrder::RowZigzag,
            (Direction::Column, false) => ScanOrder::ColumnLinear,
            (Direction::Column, true) => ScanOrder::ColumnZigzag,
        }
    }

    fn is_column_major(self) -> bool {
        matches!(self, ScanOrder::ColumnLinear | ScanOrder::ColumnZigzag)
    }

    fn is_zigzag(self) -> bool {
        matches!(self, ScanOrder::RowZigzag | ScanOrder::ColumnZigzag)
    }

    /// 对 `width x height` 的图像生成一个新的坐标序列。
    pub fn positions(self, width: u32, height: u32) -> ScanPositions {
        ScanPositions {
            order: self,
            width,
            height,
            index: 0,
            total: width as u64 * height as u64,
        }
    }
}

/// 按 [`ScanOrder`] 惰性产生 `(x, y)` 坐标的迭代器。
#[derive(Debug, Clone)]
pub struct ScanPositions {
    order: ScanOrder,
    width: u32,
    height: u32,
    index: u64,
    total: u64,
}

impl Iterator for ScanPositions {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }

        let line_len = u64::from(if self.order.is_column_major() {
            self.height
        } else {
            self.width
        });
        let line = self.index / line_len;
        let mut step = self.index % line_len;
        self.index += 1;

        // 之字形：奇数行/列反向
        if self.order.is_zigzag() && line % 2 == 1 {
            step = line_len - 1 - step;
        }

        let (line, step) = (line as u32, step as u32);
        Some(if self.order.is_column_major() {
            (line, step)
        } else {
            (step, line)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScanPositions {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn collect(order: ScanOrder, width: u32, height: u32) -> Vec<(u32, u32)> {
        order.positions(width, height).collect()
    }

    #[test]
    fn row_linear_is_raster_order() {
        assert_eq!(
            collect(ScanOrder::RowLinear, 3, 2),
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn row_zigzag_reverses_odd_rows() {
        assert_eq!(
            collect(ScanOrder::RowZigzag, 4, 2),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (3, 0),
                (3, 1),
                (2, 1),
                (1, 1),
                (0, 1)
            ]
        );
    }

    #[test]
    fn column_orders_walk_down_each_column() {
        assert_eq!(
            collect(ScanOrder::ColumnLinear, 2, 3),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert_eq!(
            collect(ScanOrder::ColumnZigzag, 3, 2),
            vec![(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn every_order_visits_each_coordinate_once() {
        for order in [
            ScanOrder::RowLinear,
            ScanOrder::RowZigzag,
            ScanOrder::ColumnLinear,
            ScanOrder::ColumnZigzag,
        ] {
            let positions = collect(order, 7, 5);
            assert_eq!(positions.len(), 35);
            let unique: HashSet<_> = positions.iter().copied().collect();
            assert_eq!(unique.len(), 35, "{order:?} repeated a coordinate");
            assert!(positions.iter().all(|&(x, y)| x < 7 && y < 5));
        }
    }

    #[test]
    fn sequences_are_restartable() {
        let order = ScanOrder::new(Direction::Column, true);
        assert_eq!(order, ScanOrder::ColumnZigzag);
        assert_eq!(collect(order, 5, 4), collect(order, 5, 4));
    }

    #[test]
    fn empty_images_yield_nothing() {
        assert_eq!(ScanOrder::RowZigzag.positions(0, 10).count(), 0);
        assert_eq!(ScanOrder::ColumnLinear.positions(10, 0).len(), 0);
    }
}
