//! Scenario files: a visual tree, a pointer script, and the elements whose
//! drag offsets to report.

use ovd_behavior::{DragController, InputEvent};
use ovd_core::id::ElementId;
use ovd_core::{DragConfig, ElementRole, RenderTransform, Size, Visual, VisualHost, VisualTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub window: WindowSpec,
    #[serde(default)]
    pub work_area: Option<[f64; 2]>,
    #[serde(default)]
    pub config: DragConfig,
    /// Parents must appear before their children.
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub draggable: Vec<HandleSpec>,
    #[serde(default)]
    pub resize_subscriptions: Vec<ElementId>,
    pub steps: Vec<Step>,
    pub report: Vec<ElementId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowSpec {
    pub id: ElementId,
    pub size: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub id: ElementId,
    pub parent: ElementId,
    #[serde(default)]
    pub role: ElementRole,
    #[serde(default)]
    pub offset: [f64; 2],
    #[serde(default)]
    pub size: [f64; 2],
    /// Pre-existing rotation, in degrees.
    #[serde(default)]
    pub rotation: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandleSpec {
    pub handle: ElementId,
    #[serde(default)]
    pub target: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointerSpec {
    pub element: ElementId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Down(PointerSpec),
    Drag(PointerSpec),
    Up(PointerSpec),
    /// Host-forced capture release.
    Cancel,
    Resize {
        element: ElementId,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub handled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub steps: Vec<StepOutcome>,
    /// Final drag translation per reported element, keyed by name.
    pub offsets: BTreeMap<ElementId, [f64; 2]>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid scenario: {e}"))
    }

    pub fn build_tree(&self) -> Result<VisualTree, String> {
        let [w, h] = self.window.size;
        let mut tree = VisualTree::new(self.window.id, Size::new(w, h));
        if let Some([w, h]) = self.work_area {
            tree = tree.with_work_area(Size::new(w, h));
        }

        for element in &self.elements {
            let mut visual = Visual::new(element.id, element.role)
                .with_offset(element.offset[0], element.offset[1])
                .with_size(element.size[0], element.size[1]);
            if let Some(degrees) = element.rotation {
                visual = visual.with_transform(RenderTransform::rotation(degrees.to_radians()));
            }
            tree.add_child_of(element.parent, visual)
                .ok_or_else(|| format!("{}: unknown parent {}", element.id, element.parent))?;
        }
        Ok(tree)
    }

    /// Replay the scenario against a fresh tree and controller.
    pub fn run(&self) -> Result<Report, String> {
        let mut tree = self.build_tree()?;
        let mut ctl = DragController::new(self.config);

        for handle in &self.draggable {
            ctl.set_draggable(&mut tree, handle.handle, true);
            ctl.set_drag_target(handle.handle, handle.target);
        }
        for adorner in &self.resize_subscriptions {
            ctl.subscribe_resize(*adorner);
        }

        let mut steps = Vec::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            let handled = match *step {
                Step::Down(p) => {
                    ctl.dispatch(&mut tree, InputEvent::down(p.element, p.x, p.y))
                        .handled
                }
                Step::Drag(p) => {
                    ctl.dispatch(&mut tree, InputEvent::drag(p.element, p.x, p.y))
                        .handled
                }
                Step::Up(p) => ctl.dispatch(&mut tree, InputEvent::up(p.element, p.x, p.y)).handled,
                Step::Cancel => ctl.cancel(),
                Step::Resize {
                    element,
                    width,
                    height,
                } => {
                    tree.set_size(element, Size::new(width, height))
                        && ctl.notify_size_changed(&tree, element)
                }
            };
            log::debug!("step {i}: {step:?} handled={handled}");
            steps.push(StepOutcome { step: i, handled });
        }

        let offsets = self
            .report
            .iter()
            .map(|id| {
                let offset = tree
                    .transform(*id)
                    .and_then(RenderTransform::drag_translation)
                    .map(|t| t.offset())
                    .unwrap_or_default();
                (*id, [offset.x, offset.y])
            })
            .collect();

        Ok(Report { steps, offsets })
    }
}
