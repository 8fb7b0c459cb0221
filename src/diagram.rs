//! The layer diagram: six fixed concept nodes, a fixed edge set, and the
//! node-selection state behind the info panel.
//!
//! The topology is hard-coded. Five solid edges run top to bottom through
//! the layers; two dashed edges are decorative cross-references beside the
//! DTO/Service/Entity region.
//!
//! ```text
//! Controller
//!     │
//!    DTO ┄┐
//!     │   ┆
//!  Service ┄┐
//!     │     ┆
//!   Entity ┄┘
//!     │
//! DAO/Repository
//!     │
//!  Database
//! ```

use std::fmt;
use std::str::FromStr;

/// Identifier of one diagram node, in top-to-bottom order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Controller,
    Dto,
    Service,
    Entity,
    Dao,
    Database,
}

impl NodeId {
    pub const ALL: [NodeId; 6] = [
        NodeId::Controller,
        NodeId::Dto,
        NodeId::Service,
        NodeId::Entity,
        NodeId::Dao,
        NodeId::Database,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::Controller => "controller",
            NodeId::Dto => "dto",
            NodeId::Service => "service",
            NodeId::Entity => "entity",
            NodeId::Dao => "dao",
            NodeId::Database => "database",
        }
    }

    /// Position from the top of the diagram.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn node(self) -> &'static ConceptNode {
        &NODES[self.index()]
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNode(pub String);

impl fmt::Display for UnknownNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = NodeId::ALL.iter().map(|n| n.as_str()).collect();
        write!(f, "unknown diagram node '{}' (expected one of: {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownNode {}

impl FromStr for NodeId {
    type Err = UnknownNode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeId::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownNode(s.to_string()))
    }
}

/// A node in the layer diagram.
#[derive(Debug, PartialEq, Eq)]
pub struct ConceptNode {
    pub id: NodeId,
    /// Label drawn in the node box and used as the panel title.
    pub label: &'static str,
    /// Short caption drawn under the label.
    pub caption: &'static str,
    /// English layer name shown in the panel.
    pub label_en: &'static str,
    pub description: &'static str,
}

pub static NODES: [ConceptNode; 6] = [
    ConceptNode {
        id: NodeId::Controller,
        label: "Controller",
        caption: "Presentation",
        label_en: "Presentation Layer",
        description: "HTTP 요청을 받아 적절한 응답을 반환합니다. DTO를 사용하여 데이터를 주고받습니다.",
    },
    ConceptNode {
        id: NodeId::Dto,
        label: "DTO",
        caption: "Data Transfer",
        label_en: "Data Transfer Object",
        description: "계층 간 데이터 전송을 위한 객체입니다. View와 Controller, Controller와 Service 간 데이터를 전달합니다.",
    },
    ConceptNode {
        id: NodeId::Service,
        label: "Service",
        caption: "Business Logic",
        label_en: "Business Logic Layer",
        description: "비즈니스 로직을 처리합니다. Entity와 DTO 간의 변환을 수행하고 DAO/Repository를 호출합니다.",
    },
    ConceptNode {
        id: NodeId::Entity,
        label: "Entity",
        caption: "Domain Model",
        label_en: "Domain Model",
        description: "데이터베이스 테이블과 매핑되는 객체입니다. 영속성을 가지며 JPA가 관리합니다.",
    },
    ConceptNode {
        id: NodeId::Dao,
        label: "DAO/Repository",
        caption: "Data Access",
        label_en: "Data Access Layer",
        description: "데이터베이스에 접근하여 CRUD 작업을 수행합니다. Entity를 사용합니다.",
    },
    ConceptNode {
        id: NodeId::Database,
        label: "Database",
        caption: "Persistence",
        label_en: "Persistence",
        description: "실제 데이터가 저장되는 곳입니다. 테이블, 컬럼, 관계 등으로 구성됩니다.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Solid arrow between consecutive layers.
    Flow,
    /// Dashed line drawn beside the stack; purely visual.
    CrossReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

const fn flow(from: NodeId, to: NodeId) -> Edge {
    Edge { from, to, kind: EdgeKind::Flow }
}

const fn cross(from: NodeId, to: NodeId) -> Edge {
    Edge { from, to, kind: EdgeKind::CrossReference }
}

pub static EDGES: [Edge; 7] = [
    flow(NodeId::Controller, NodeId::Dto),
    flow(NodeId::Dto, NodeId::Service),
    flow(NodeId::Service, NodeId::Entity),
    flow(NodeId::Entity, NodeId::Dao),
    flow(NodeId::Dao, NodeId::Database),
    cross(NodeId::Dto, NodeId::Service),
    cross(NodeId::Service, NodeId::Entity),
];

// ============================================================================
// Layout
// ============================================================================

pub const VIEW_WIDTH: u32 = 600;
pub const VIEW_HEIGHT: u32 = 700;
pub const NODE_WIDTH: u32 = 200;
pub const NODE_HEIGHT: u32 = 60;
const NODE_X: u32 = 200;
const TOP_MARGIN: u32 = 20;
const ROW_PITCH: u32 = 120;
/// Horizontal offsets of the two dashed cross-reference lines.
const CROSS_X: [u32; 2] = [400, 200];

/// Node box geometry in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NodeBox {
    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn middle_y(&self) -> u32 {
        self.y + self.height / 2
    }
}

pub fn node_box(id: NodeId) -> NodeBox {
    NodeBox {
        x: NODE_X,
        y: TOP_MARGIN + ROW_PITCH * id.index() as u32,
        width: NODE_WIDTH,
        height: NODE_HEIGHT,
    }
}

/// A straight line segment in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// Geometry for one edge.
///
/// Flow edges run from the bottom of `from` to the top of `to`. Cross
/// references run beside the stack between the vertical midpoints of the
/// two nodes, alternating right then left.
pub fn edge_segment(edge: &Edge) -> Segment {
    let from = node_box(edge.from);
    let to = node_box(edge.to);
    match edge.kind {
        EdgeKind::Flow => Segment {
            x1: from.center_x(),
            y1: from.bottom(),
            x2: to.center_x(),
            y2: to.y,
        },
        EdgeKind::CrossReference => {
            let nth = EDGES
                .iter()
                .filter(|e| e.kind == EdgeKind::CrossReference)
                .position(|e| e == edge)
                .unwrap_or(0);
            let x = CROSS_X[nth % CROSS_X.len()];
            Segment {
                x1: x,
                y1: from.middle_y(),
                x2: x,
                y2: to.middle_y(),
            }
        }
    }
}

// ============================================================================
// Selection state
// ============================================================================

/// Keys a focused node reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// Which node, if any, has its info panel open.
///
/// There is no terminal state: selection can change or close any number of
/// times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramSelection {
    selected: Option<NodeId>,
}

impl DiagramSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagram rendered with `id` already selected.
    pub fn with_selected(id: NodeId) -> Self {
        Self { selected: Some(id) }
    }

    /// Pointer selection. Replaces any current selection.
    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    /// Keyboard interaction on a focused node. Enter selects it and Escape
    /// closes the panel; other keys do nothing. Returns whether the state
    /// changed.
    pub fn activate(&mut self, id: NodeId, key: Key) -> bool {
        let before = self.selected;
        match key {
            Key::Enter => self.select(id),
            Key::Escape => self.close(),
            Key::Space | Key::Other => {}
        }
        before != self.selected
    }

    /// Close the info panel.
    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<NodeId> {
        self.selected
    }

    /// Node whose info panel is showing.
    pub fn selected(&self) -> Option<&'static ConceptNode> {
        self.selected.map(NodeId::node)
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected == Some(id)
    }
}
