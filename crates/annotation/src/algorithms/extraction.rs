use image::GrayImage;
use imageproc::contours::BorderType;
use kurbo::Point;

/// Links of one contour within a [`ContourHierarchy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyLink {
    pub next: Option<usize>,
    pub first_child: Option<usize>,
    pub parent: Option<usize>,
}

/// Two-level contour hierarchy: outer boundaries at the top, their holes
/// as children. Components nested inside a hole are promoted to the top
/// level, so every hole's parent is an outer boundary.
#[derive(Debug, Clone, Default)]
pub struct ContourHierarchy {
    pub contours: Vec<Vec<Point>>,
    pub links: Vec<HierarchyLink>,
    first_outer: Option<usize>,
}

impl ContourHierarchy {
    /// Trace every border of the non-zero pixels in `binary`.
    pub fn trace(binary: &GrayImage) -> Self {
        let traced = imageproc::contours::find_contours::<i32>(binary);

        let contours: Vec<Vec<Point>> = traced
            .iter()
            .map(|contour| {
                contour
                    .points
                    .iter()
                    .map(|p| Point::new(p.x as f64, p.y as f64))
                    .collect()
            })
            .collect();
        let mut links = vec![HierarchyLink::default(); contours.len()];

        let outers: Vec<usize> = traced
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.border_type, BorderType::Outer))
            .map(|(i, _)| i)
            .collect();
        chain_siblings(&mut links, &outers);

        for &outer in &outers {
            let holes: Vec<usize> = traced
                .iter()
                .enumerate()
                .filter(|(_, c)| matches!(c.border_type, BorderType::Hole) && c.parent == Some(outer))
                .map(|(i, _)| i)
                .collect();
            chain_siblings(&mut links, &holes);
            for &hole in &holes {
                links[hole].parent = Some(outer);
            }
            links[outer].first_child = holes.first().copied();
        }

        Self {
            contours,
            links,
            first_outer: outers.first().copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Outer boundaries, following the sibling chain from the first one.
    pub fn outers(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.first_outer, move |&i| self.links[i].next)
    }

    /// Holes of the outer boundary `index`, in sibling order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.links[index].first_child, move |&i| self.links[i].next)
    }
}

fn chain_siblings(links: &mut [HierarchyLink], siblings: &[usize]) {
    for (pos, &index) in siblings.iter().enumerate() {
        links[index].next = siblings.get(pos + 1).copied();
    }
}
