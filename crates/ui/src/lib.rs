#![warn(missing_docs)]
//! Inventory presentation: slot geometry, item sprites and egui painting.

pub mod atlas;
pub mod layout;

use egui::{Align2, Color32, FontId, Painter, Pos2, TextureHandle};
use gridstash_core::{GridInventory, Slot};

pub use atlas::{AtlasError, SpriteAtlas, DEFAULT_TILE_SIZE};
pub use layout::{CellRect, GridLayout};

/// Window clear colour behind the grid.
pub const BACKGROUND_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

/// Fill colour of an unoccupied cell.
pub const CELL_COLOR: Color32 = Color32::from_rgb(20, 20, 20);

/// Atlas uploaded to the GPU through egui.
pub struct AtlasTexture {
    atlas: SpriteAtlas,
    texture: TextureHandle,
}

impl AtlasTexture {
    /// Upload `atlas` into the egui context with nearest-neighbour sampling.
    pub fn upload(ctx: &egui::Context, atlas: SpriteAtlas) -> Self {
        let texture = ctx.load_texture(
            "item-atlas",
            atlas.to_color_image(),
            egui::TextureOptions::NEAREST,
        );
        Self { atlas, texture }
    }

    /// The CPU-side atlas.
    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }
}

/// Draws an inventory grid and the cursor-held stack.
#[derive(Debug, Clone, Copy)]
pub struct InventoryView {
    layout: GridLayout,
}

impl InventoryView {
    /// Create a view over the given layout.
    pub fn new(layout: GridLayout) -> Self {
        Self { layout }
    }

    /// Slot under a pointer position, if any.
    pub fn slot_at(&self, inventory: &GridInventory, pointer: Pos2) -> Option<usize> {
        self.layout.slot_at(pointer.x, pointer.y, inventory.len())
    }

    /// Paint every cell, then the held stack following the pointer.
    pub fn paint(
        &self,
        painter: &Painter,
        inventory: &GridInventory,
        atlas: &AtlasTexture,
        pointer: Option<Pos2>,
    ) {
        for (index, slot) in inventory.slots().iter().enumerate() {
            let rect = self.layout.cell_rect(index).to_egui();
            painter.rect_filled(rect, 0.0, CELL_COLOR);
            paint_stack(painter, atlas, slot, rect);
        }

        if let Some(pointer) = pointer {
            let rect = self.layout.held_rect(pointer.x, pointer.y).to_egui();
            paint_stack(painter, atlas, inventory.held(), rect);
        }
    }
}

fn paint_stack(painter: &Painter, atlas: &AtlasTexture, slot: &Slot, rect: egui::Rect) {
    if slot.is_empty() {
        return;
    }
    if let Some(uv) = atlas.atlas().uv_rect(slot.item()) {
        painter.image(atlas.texture.id(), rect, uv, Color32::WHITE);
    }
    painter.text(
        rect.min,
        Align2::LEFT_TOP,
        slot.amount().to_string(),
        FontId::monospace(14.0),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_resolves_pointer_within_inventory_bounds() {
        let view = InventoryView::new(GridLayout::default());
        let inventory = GridInventory::new(9);

        assert_eq!(view.slot_at(&inventory, egui::pos2(210.0, 210.0)), Some(0));
        // Second row exists on screen but not in a single-row inventory.
        assert_eq!(view.slot_at(&inventory, egui::pos2(210.0, 280.0)), None);
    }

    #[test]
    fn uploaded_atlas_keeps_tile_lookup() {
        let ctx = egui::Context::default();
        let texture = AtlasTexture::upload(&ctx, SpriteAtlas::placeholder(8, 4, 2));

        assert_eq!(texture.atlas().columns(), 4);
        assert!(texture.atlas().uv_rect(8).is_some());
        assert!(texture.atlas().uv_rect(9).is_none());
    }
}
