//! 课程地图布局
//!
//! `layout` 是 `(course, active, compact)` 的纯函数：
//! 课时按模块顺序展开，展开后的序号决定节点坐标，
//! 相邻节点之间用三次贝塞尔曲线连接。没有任何随机量，每次渲染结果一致。

use crate::{Course, LessonKind, LocalizedText};
use std::f32::consts::PI;
use std::fmt::Write;

/// 紧凑布局的折线偏移：中 -> 左 -> 中 -> 右
const ZIGZAG_OFFSETS: [f32; 4] = [0.0, -1.0, 0.0, 1.0];
/// 波浪布局每个节点前进的相位（6 个节点一个周期）
const WAVE_PHASE_STEP: f32 = PI / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapVariant {
    /// 正弦波
    Wave,
    /// 左/中/右交替
    Zigzag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub variant: MapVariant,
    pub width: f32,
    /// 水平最大偏移
    pub amplitude: f32,
    /// 相邻节点的垂直间距
    pub vertical_step: f32,
    pub top_padding: f32,
    pub node_radius: f32,
}

impl LayoutParams {
    pub fn full() -> Self {
        Self {
            variant: MapVariant::Wave,
            width: 400.0,
            amplitude: 80.0,
            vertical_step: 120.0,
            top_padding: 80.0,
            node_radius: 40.0,
        }
    }

    pub fn compact() -> Self {
        Self {
            variant: MapVariant::Zigzag,
            width: 280.0,
            amplitude: 40.0,
            vertical_step: 96.0,
            top_padding: 64.0,
            node_radius: 32.0,
        }
    }

    fn offset(&self, index: usize) -> f32 {
        match self.variant {
            MapVariant::Zigzag => ZIGZAG_OFFSETS[index % ZIGZAG_OFFSETS.len()] * self.amplitude,
            MapVariant::Wave => (index as f32 * WAVE_PHASE_STEP).sin() * self.amplitude,
        }
    }

    /// 展开序号对应的节点坐标
    pub fn position(&self, index: usize) -> Point {
        Point {
            x: self.width / 2.0 + self.offset(index),
            y: self.top_padding + index as f32 * self.vertical_step,
        }
    }
}

/// 节点视觉状态，优先级：锁定 > 已完成 > 当前 > 默认
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Locked,
    Completed,
    Active,
    Default,
}

impl NodeStatus {
    pub fn resolve(is_locked: bool, is_completed: bool, is_active: bool) -> Self {
        if is_locked {
            NodeStatus::Locked
        } else if is_completed {
            NodeStatus::Completed
        } else if is_active {
            NodeStatus::Active
        } else {
            NodeStatus::Default
        }
    }

    /// 只有未锁定的节点可以点选
    pub fn is_selectable(&self) -> bool {
        !matches!(self, NodeStatus::Locked)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NodeStatus::Locked => "map-node map-node--locked",
            NodeStatus::Completed => "map-node map-node--completed",
            NodeStatus::Active => "map-node map-node--active",
            NodeStatus::Default => "map-node",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub slug: String,
    pub title: LocalizedText,
    pub kind: LessonKind,
    pub module_index: usize,
    /// 按模块顺序展开后的序号
    pub index: usize,
    pub position: Point,
    pub status: NodeStatus,
}

/// 模块标题横幅，位于该模块第一个课时上方
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleBanner {
    pub module_id: u64,
    pub title: LocalizedText,
    pub y: f32,
    /// 模块中存在已解锁的课时
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

impl CubicSegment {
    /// 控制点位于两端垂直距离的一半处
    fn between(from: Point, to: Point) -> Self {
        let dy = (to.y - from.y) / 2.0;
        Self {
            from,
            c1: Point {
                x: from.x,
                y: from.y + dy,
            },
            c2: Point { x: to.x, y: to.y - dy },
            to,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    pub nodes: Vec<MapNode>,
    pub banners: Vec<ModuleBanner>,
    pub segments: Vec<CubicSegment>,
    pub width: f32,
    pub height: f32,
    pub node_radius: f32,
}

impl MapLayout {
    pub fn node(&self, slug: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.slug == slug)
    }

    /// SVG `<path d=...>` 字符串
    pub fn path_d(&self) -> String {
        let mut d = String::new();
        let Some(first) = self.nodes.first() else {
            return d;
        };
        let _ = write!(d, "M{:.1} {:.1}", first.position.x, first.position.y);
        for s in &self.segments {
            let _ = write!(
                d,
                " C{:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}",
                s.c1.x, s.c1.y, s.c2.x, s.c2.y, s.to.x, s.to.y
            );
        }
        d
    }
}

/// 计算课程地图布局
pub fn layout(course: &Course, active: Option<&str>, compact: bool) -> MapLayout {
    let params = if compact {
        LayoutParams::compact()
    } else {
        LayoutParams::full()
    };
    layout_with(course, active, &params)
}

pub fn layout_with(course: &Course, active: Option<&str>, params: &LayoutParams) -> MapLayout {
    let mut nodes = Vec::new();
    let mut banners = Vec::new();

    for (module_index, module) in course.modules.iter().enumerate() {
        if let Some(first) = module.lessons.first().map(|_| nodes.len()) {
            banners.push(ModuleBanner {
                module_id: module.id,
                title: module.title.clone(),
                y: params.position(first).y - params.vertical_step / 2.0,
                highlighted: module.is_unlocked(),
            });
        }

        for lesson in &module.lessons {
            let index = nodes.len();
            let is_active = active == Some(lesson.slug.as_str());
            nodes.push(MapNode {
                slug: lesson.slug.clone(),
                title: lesson.title.clone(),
                kind: lesson.kind,
                module_index,
                index,
                position: params.position(index),
                status: NodeStatus::resolve(!lesson.is_unlocked, lesson.is_completed, is_active),
            });
        }
    }

    let segments = nodes
        .windows(2)
        .map(|pair| CubicSegment::between(pair[0].position, pair[1].position))
        .collect();

    let height = match nodes.last() {
        Some(last) => last.position.y + params.top_padding,
        None => params.top_padding * 2.0,
    };

    MapLayout {
        nodes,
        banners,
        segments,
        width: params.width,
        height,
        node_radius: params.node_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LessonSummary, Module};

    fn lesson(slug: &str, unlocked: bool, completed: bool) -> LessonSummary {
        LessonSummary {
            id: 0,
            slug: slug.into(),
            kind: LessonKind::Theory,
            title: slug.into(),
            is_unlocked: unlocked,
            is_completed: completed,
        }
    }

    fn course() -> Course {
        Course {
            slug: "backend".into(),
            title: "Backend".into(),
            description: None,
            modules: vec![
                Module {
                    id: 1,
                    title: "Basics".into(),
                    lessons: vec![
                        lesson("a", true, true),
                        lesson("b", true, false),
                        lesson("c", false, false),
                    ],
                },
                Module {
                    id: 2,
                    title: "Loops".into(),
                    lessons: vec![lesson("d", false, false), lesson("e", false, true)],
                },
            ],
        }
    }

    #[test]
    fn status_precedence() {
        assert_eq!(NodeStatus::resolve(true, true, true), NodeStatus::Locked);
        assert_eq!(NodeStatus::resolve(false, true, true), NodeStatus::Completed);
        assert_eq!(NodeStatus::resolve(false, false, true), NodeStatus::Active);
        assert_eq!(NodeStatus::resolve(false, false, false), NodeStatus::Default);
    }

    #[test]
    fn lessons_are_flattened_in_module_order() {
        let map = layout(&course(), Some("b"), false);
        let slugs: Vec<_> = map.nodes.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b", "c", "d", "e"]);
        assert_eq!(map.nodes[3].module_index, 1);
        assert_eq!(map.nodes[3].index, 3);

        let statuses: Vec<_> = map.nodes.iter().map(|n| n.status).collect();
        assert_eq!(
            statuses,
            [
                NodeStatus::Completed,
                NodeStatus::Active,
                NodeStatus::Locked,
                NodeStatus::Locked,
                NodeStatus::Locked,
            ]
        );
    }

    #[test]
    fn layout_is_deterministic() {
        let c = course();
        for compact in [false, true] {
            assert_eq!(layout(&c, None, compact), layout(&c, None, compact));
        }
    }

    #[test]
    fn zigzag_alternates_center_left_center_right() {
        let map = layout(&course(), None, true);
        let p = LayoutParams::compact();
        let center = p.width / 2.0;
        let xs: Vec<_> = map.nodes.iter().map(|n| n.position.x).collect();
        assert_eq!(
            xs,
            [
                center,
                center - p.amplitude,
                center,
                center + p.amplitude,
                center
            ]
        );
        for (i, node) in map.nodes.iter().enumerate() {
            assert_eq!(node.position.y, p.top_padding + i as f32 * p.vertical_step);
        }
    }

    #[test]
    fn wave_stays_within_amplitude() {
        let map = layout(&course(), None, false);
        let p = LayoutParams::full();
        for node in &map.nodes {
            assert!((node.position.x - p.width / 2.0).abs() <= p.amplitude + f32::EPSILON);
        }
        assert_eq!(map.nodes[0].position.x, p.width / 2.0);
    }

    #[test]
    fn segments_connect_consecutive_nodes() {
        let map = layout(&course(), None, true);
        assert_eq!(map.segments.len(), map.nodes.len() - 1);
        for (seg, pair) in map.segments.iter().zip(map.nodes.windows(2)) {
            assert_eq!(seg.from, pair[0].position);
            assert_eq!(seg.to, pair[1].position);
            assert_eq!(seg.c1.x, seg.from.x);
            assert_eq!(seg.c2.x, seg.to.x);
        }
        let d = map.path_d();
        assert!(d.starts_with("M140.0 64.0 C"));
        assert_eq!(d.matches(" C").count(), 4);
    }

    #[test]
    fn banners_mark_modules_with_unlocked_lessons() {
        let map = layout(&course(), None, false);
        assert_eq!(map.banners.len(), 2);
        assert!(map.banners[0].highlighted);
        assert!(!map.banners[1].highlighted);
        assert!(map.banners[1].y < map.nodes[3].position.y);
        assert!(map.banners[1].y > map.nodes[2].position.y);
    }

    #[test]
    fn empty_course_has_no_path() {
        let empty = Course {
            slug: "x".into(),
            title: "X".into(),
            description: None,
            modules: vec![],
        };
        let map = layout(&empty, None, false);
        assert!(map.nodes.is_empty());
        assert!(map.path_d().is_empty());
        assert_eq!(map.height, LayoutParams::full().top_padding * 2.0);
    }

    #[test]
    fn node_lookup_by_slug() {
        let map = layout(&course(), Some("b"), false);
        let node = map.node("b").expect("node b");
        assert_eq!(node.index, 1);
        assert_eq!(node.status, NodeStatus::Active);
        assert_eq!(map.node("c").map(|n| n.status), Some(NodeStatus::Locked));
        assert!(map.node("missing").is_none());
    }
}
