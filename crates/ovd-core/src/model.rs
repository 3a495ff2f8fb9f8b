//! Retained visual tree.
//!
//! A DAG where nodes are visual elements and edges run parent→child.
//! Each element carries its arranged offset within the parent, its render
//! and measured sizes, and an optional render transform. Layout itself is
//! the host's business; this tree only records the results.

use crate::host::{Cursor, ElementRole, VisualHost};
use crate::id::ElementId;
use crate::transform::RenderTransform;
use kurbo::{Affine, Size, Vec2};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

/// Fallback work area when the embedding host does not report one.
pub const DEFAULT_WORK_AREA: Size = Size::new(1920.0, 1040.0);

// ─── Visual ──────────────────────────────────────────────────────────────

/// A single element in the visual tree.
#[derive(Debug, Clone)]
pub struct Visual {
    pub id: ElementId,
    pub role: ElementRole,

    /// Arranged position within the parent's local space.
    pub offset: Vec2,

    /// Size after arrange. Zero until the element has been laid out.
    pub render_size: Size,

    /// Size requested during measure.
    pub desired_size: Size,

    pub transform: Option<RenderTransform>,
    pub cursor: Cursor,
}

impl Visual {
    pub fn new(id: ElementId, role: ElementRole) -> Self {
        Self {
            id,
            role,
            offset: Vec2::ZERO,
            render_size: Size::ZERO,
            desired_size: Size::ZERO,
            transform: None,
            cursor: Cursor::default(),
        }
    }

    #[must_use]
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Set both render and measured size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.render_size = Size::new(width, height);
        self.desired_size = self.render_size;
        self
    }

    #[must_use]
    pub fn with_desired_size(mut self, width: f64, height: f64) -> Self {
        self.desired_size = Size::new(width, height);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: RenderTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Parent-relative placement: arranged offset, then render transform.
    fn local_to_parent(&self) -> Affine {
        let render = self
            .transform
            .as_ref()
            .map_or(Affine::IDENTITY, RenderTransform::affine);
        Affine::translate(self.offset) * render
    }
}

// ─── Visual tree ─────────────────────────────────────────────────────────

/// A window's retained visual tree.
#[derive(Debug, Clone)]
pub struct VisualTree {
    pub graph: StableDiGraph<Visual, ()>,

    /// The window node.
    pub root: NodeIndex,

    /// Index from ElementId → NodeIndex for fast lookup.
    pub id_index: HashMap<ElementId, NodeIndex>,

    pub work_area: Size,
}

impl VisualTree {
    /// Create a tree whose root is a window of the given size.
    #[must_use]
    pub fn new(window_id: ElementId, window_size: Size) -> Self {
        let mut graph = StableDiGraph::new();
        let window = Visual {
            render_size: window_size,
            desired_size: window_size,
            ..Visual::new(window_id, ElementRole::Window)
        };
        let root = graph.add_node(window);

        let mut id_index = HashMap::new();
        id_index.insert(window_id, root);

        Self {
            graph,
            root,
            id_index,
            work_area: DEFAULT_WORK_AREA,
        }
    }

    #[must_use]
    pub fn with_work_area(mut self, work_area: Size) -> Self {
        self.work_area = work_area;
        self
    }

    pub fn root_id(&self) -> ElementId {
        self.graph[self.root].id
    }

    /// Add an element as a child of `parent`. Returns the new node's index.
    pub fn add_element(&mut self, parent: NodeIndex, visual: Visual) -> NodeIndex {
        let id = visual.id;
        let idx = self.graph.add_node(visual);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Add an element under the parent with the given id.
    pub fn add_child_of(&mut self, parent: ElementId, visual: Visual) -> Option<NodeIndex> {
        let parent_idx = self.index_of(parent)?;
        Some(self.add_element(parent_idx, visual))
    }

    /// Remove an element, keeping the `id_index` synchronized.
    pub fn remove_element(&mut self, idx: NodeIndex) -> Option<Visual> {
        let removed = self.graph.remove_node(idx);
        if let Some(visual) = &removed {
            self.id_index.remove(&visual.id);
        }
        removed
    }

    pub fn get_by_id(&self, id: ElementId) -> Option<&Visual> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn get_by_id_mut(&mut self, id: ElementId) -> Option<&mut Visual> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn index_of(&self, id: ElementId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Get the parent index of a node.
    pub fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children of a node in insertion order.
    ///
    /// Sorted by `NodeIndex` so the result does not depend on how
    /// `petgraph` iterates its adjacency list.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Record a new arranged size. Returns true if the size changed.
    ///
    /// Callers hosting overlay content forward a `true` result to
    /// the drag controller's size-changed notification.
    pub fn set_size(&mut self, id: ElementId, size: Size) -> bool {
        let Some(visual) = self.get_by_id_mut(id) else {
            return false;
        };
        if visual.render_size == size {
            return false;
        }
        visual.render_size = size;
        visual.desired_size = size;
        true
    }

    pub fn set_offset(&mut self, id: ElementId, offset: Vec2) {
        if let Some(visual) = self.get_by_id_mut(id) {
            visual.offset = offset;
        }
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        if ancestor == descendant {
            return false;
        }
        let Some(mut current) = self.index_of(descendant) else {
            return false;
        };
        while let Some(parent) = self.parent_index(current) {
            if self.graph[parent].id == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }
}

impl VisualHost for VisualTree {
    fn contains(&self, id: ElementId) -> bool {
        self.id_index.contains_key(&id)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        let idx = self.index_of(id)?;
        self.parent_index(idx).map(|p| self.graph[p].id)
    }

    fn first_child(&self, id: ElementId) -> Option<ElementId> {
        let idx = self.index_of(id)?;
        self.children(idx).first().map(|c| self.graph[*c].id)
    }

    fn role(&self, id: ElementId) -> Option<ElementRole> {
        self.get_by_id(id).map(|v| v.role)
    }

    fn render_size(&self, id: ElementId) -> Size {
        self.get_by_id(id).map_or(Size::ZERO, |v| v.render_size)
    }

    fn desired_size(&self, id: ElementId) -> Size {
        self.get_by_id(id).map_or(Size::ZERO, |v| v.desired_size)
    }

    fn window_size(&self, id: ElementId) -> Option<Size> {
        self.contains(id).then(|| self.graph[self.root].render_size)
    }

    fn work_area(&self) -> Size {
        self.work_area
    }

    fn local_to_root(&self, id: ElementId) -> Affine {
        let Some(mut idx) = self.index_of(id) else {
            return Affine::IDENTITY;
        };
        let mut affine = self.graph[idx].local_to_parent();
        while let Some(parent) = self.parent_index(idx) {
            affine = self.graph[parent].local_to_parent() * affine;
            idx = parent;
        }
        affine
    }

    fn transform(&self, id: ElementId) -> Option<&RenderTransform> {
        self.get_by_id(id).and_then(|v| v.transform.as_ref())
    }

    fn set_transform(&mut self, id: ElementId, transform: RenderTransform) {
        if let Some(visual) = self.get_by_id_mut(id) {
            visual.transform = Some(transform);
        }
    }

    fn set_cursor(&mut self, id: ElementId, cursor: Cursor) {
        if let Some(visual) = self.get_by_id_mut(id) {
            visual.cursor = cursor;
        }
    }
}
