use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_ring, fill_ring, ring_centroid_px};
use crate::quiz::region::{Region, RegionState};

/// Braille layers for one frame, rendered back-to-front by the map widget.
/// Fills are split by state so each layer can be painted in its own color.
pub struct MapLayers {
    pub outlines: BrailleCanvas,
    pub correct: BrailleCanvas,
    pub incorrect: BrailleCanvas,
    /// (char column, char row, text) for every resolved region's name.
    pub labels: Vec<(u16, u16, String)>,
}

/// Draw every region's projected geometry into fresh layers.
///
/// Outlines are always drawn; a region resolved this round additionally gets
/// its rings filled on the matching state layer and a name label anchored at
/// the centroid of its first ring. Pure function of the region slice: all
/// quiz state lives in the engine.
pub fn render_layers(regions: &[Region], char_width: usize, char_height: usize) -> MapLayers {
    let mut layers = MapLayers {
        outlines: BrailleCanvas::new(char_width, char_height),
        correct: BrailleCanvas::new(char_width, char_height),
        incorrect: BrailleCanvas::new(char_width, char_height),
        labels: Vec::new(),
    };

    for region in regions {
        for ring in &region.projected {
            draw_ring(&mut layers.outlines, ring);
            match region.state {
                RegionState::Correct => fill_ring(&mut layers.correct, ring),
                RegionState::Incorrect => fill_ring(&mut layers.incorrect, ring),
                RegionState::Unresolved => {}
            }
        }

        if region.state != RegionState::Unresolved {
            if let Some(first) = region.projected.first() {
                let (px, py) = ring_centroid_px(first);
                if px >= 0 && py >= 0 {
                    // Braille pixels → character cells.
                    layers
                        .labels
                        .push(((px / 2) as u16, (py / 4) as u16, region.name.clone()));
                }
            }
        }
    }

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::region::GeoRing;

    fn region(name: &str, state: RegionState) -> Region {
        let px = vec![(0, 0), (20, 0), (20, 20), (0, 20), (0, 0)];
        let geo: GeoRing = px.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
        Region {
            name: name.to_string(),
            rings: vec![geo],
            projected: vec![px],
            state,
        }
    }

    #[test]
    fn test_unresolved_region_outline_only() {
        let layers = render_layers(&[region("alpha", RegionState::Unresolved)], 20, 10);
        assert!(layers.outlines.cell_occupied(0, 0));
        assert!(!layers.correct.cell_occupied(5, 2)); // interior untouched
        assert!(!layers.incorrect.cell_occupied(5, 2));
        assert!(layers.labels.is_empty());
    }

    #[test]
    fn test_correct_region_fills_and_labels() {
        let layers = render_layers(&[region("alpha", RegionState::Correct)], 20, 10);
        // Interior pixel (10,10) lives in char cell (5, 2).
        assert!(layers.correct.cell_occupied(5, 2));
        assert!(!layers.incorrect.cell_occupied(5, 2));
        assert_eq!(layers.labels.len(), 1);
        let (cx, cy, ref text) = layers.labels[0];
        assert_eq!((cx, cy), (5, 2)); // centroid (10,10) → cell (5,2)
        assert_eq!(text, "alpha");
    }

    #[test]
    fn test_incorrect_region_fills_red_layer() {
        let layers = render_layers(&[region("alpha", RegionState::Incorrect)], 20, 10);
        assert!(layers.incorrect.cell_occupied(5, 2));
        assert!(!layers.correct.cell_occupied(5, 2));
        assert_eq!(layers.labels.len(), 1);
    }
}
