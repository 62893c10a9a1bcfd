//! Layered Compositor
//!
//! Manages z-ordered layers for rendering. Each layer has its own buffer
//! and can be placed and shown or hidden independently.
//!
//! The compositor composites all visible layers into a final output buffer.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let layer = Layer::new(id, bounds, z_index);
        self.layers.insert(id, layer);
        self.update_render_order();

        id
    }

    /// Get mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Screen bounds of a layer
    pub fn layer_bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Move and resize a layer; the buffer is reallocated only on a size change
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            let resized =
                layer.bounds.width != bounds.width || layer.bounds.height != bounds.height;
            layer.bounds = bounds;
            if resized {
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer (solid occlusion)
    fn blit_layer(output: &mut Buffer, area: Rect, layer: &Layer) {
        let lb = layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x.saturating_add(lx);
                let dst_y = lb.y.saturating_add(ly);

                if dst_x >= area.x + area.width || dst_y >= area.y + area.height {
                    continue;
                }

                let Some(src_cell) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };

                // Space cells are transparent
                if src_cell.symbol() != " " {
                    if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                        *dst = src_cell.clone();
                    }
                }
            }
        }
    }

    /// Find the topmost visible layer at a screen position (for mouse events)
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        // Front to back
        self.render_order.iter().rev().copied().find(|id| {
            self.layers
                .get(id)
                .is_some_and(|layer| layer.visible && layer.contains(x, y))
        })
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| (self.layers.get(id).map_or(0, |l| l.z_index), id.0));
    }
}
