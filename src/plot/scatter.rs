//! # 单帧三维散点图
//!
//! 使用 `plotters` 把一帧的投影渲染成三维散点图，每个物种一种颜色。
//!
//! ## 功能
//! - PNG / SVG 输出
//! - 颜色按本帧物种名排序后循环分配
//! - 坐标轴范围按数据自动确定
//!
//! ## 依赖关系
//! - 被 `commands/view.rs` 调用
//! - 使用 `models/frame.rs` 的 FrameProjection
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XyzError};
use crate::models::FrameProjection;

use plotters::prelude::*;
use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

/// 物种调色板：red, green, blue, yellow, purple, orange, cyan, magenta, lime, pink
const PALETTE: [RGBColor; 10] = [
    RGBColor(255, 0, 0),
    RGBColor(0, 128, 0),
    RGBColor(0, 0, 255),
    RGBColor(255, 255, 0),
    RGBColor(128, 0, 128),
    RGBColor(255, 165, 0),
    RGBColor(0, 255, 255),
    RGBColor(255, 0, 255),
    RGBColor(0, 255, 0),
    RGBColor(255, 192, 203),
];

/// 图像尺寸与格式
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
    /// 点半径（像素）
    pub marker_size: i32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            width: 900,
            height: 800,
            use_svg: false,
            marker_size: 5,
        }
    }
}

/// 按物种名排序后分配颜色
pub fn species_colors(labels: &[String]) -> Vec<(String, RGBColor)> {
    let unique: BTreeSet<&String> = labels.iter().collect();
    unique
        .into_iter()
        .enumerate()
        .map(|(i, s)| (s.clone(), PALETTE[i % PALETTE.len()]))
        .collect()
}

/// 数据范围，退化时向两侧扩展
pub fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return -1.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad)..(max + pad)
}

/// 渲染一帧
pub fn render_frame(projection: &FrameProjection, output_path: &Path, options: PlotOptions) -> Result<()> {
    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_frame(&root, projection, options.marker_size)?;
        root.present()
            .map_err(|e| XyzError::PlotError(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_frame(&root, projection, options.marker_size)?;
        root.present()
            .map_err(|e| XyzError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 绘制散点图的核心逻辑
fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    projection: &FrameProjection,
    marker_size: i32,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| XyzError::PlotError(format!("{:?}", e)))?;

    let coords = &projection.coords;
    let x_range = axis_range(coords.iter().map(|c| c.0));
    let y_range = axis_range(coords.iter().map(|c| c.1));
    let z_range = axis_range(coords.iter().map(|c| c.2));

    let title = format!("Frame {}", projection.frame_index);
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(20)
        .build_cartesian_3d(x_range, y_range, z_range)
        .map_err(|e| XyzError::PlotError(format!("{:?}", e)))?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.4;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()
        .map_err(|e| XyzError::PlotError(format!("{:?}", e)))?;

    for (species, color) in species_colors(&projection.atom_labels) {
        let points: Vec<(f64, f64, f64)> = projection
            .atom_labels
            .iter()
            .zip(coords)
            .filter(|(label, _)| **label == species)
            .map(|(_, c)| *c)
            .collect();

        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, marker_size, color.filled())),
            )
            .map_err(|e| XyzError::PlotError(format!("{:?}", e)))?
            .label(species)
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| XyzError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_colors_sorted_and_unique() {
        let labels: Vec<String> = ["O", "H", "H", "C"].iter().map(|s| s.to_string()).collect();
        let colors = species_colors(&labels);
        let names: Vec<&str> = colors.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["C", "H", "O"]);
        assert_eq!(colors[0].1, PALETTE[0]);
        assert_eq!(colors[2].1, PALETTE[2]);
    }

    #[test]
    fn test_axis_range_handles_degenerate_data() {
        let r = axis_range([1.0, 1.0].into_iter());
        assert!(r.start < 1.0 && r.end > 1.0);

        let r = axis_range(std::iter::empty());
        assert_eq!(r, -1.0..1.0);

        let r = axis_range([0.0, 10.0].into_iter());
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }
}
