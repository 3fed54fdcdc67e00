//! Literal constructors for small test stacks

use lamina_core::{ImageStack, LabelStack, Shape, Stack};

fn from_rows<T: Copy>(rows: &[&[T]]) -> Stack<T> {
    let shape = Shape::new(&[rows.len(), rows[0].len()]).expect("non-empty rows");
    let data: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Stack::from_vec(shape, data).expect("rectangular rows")
}

fn from_planes<T: Copy>(planes: &[&[&[T]]]) -> Stack<T> {
    let shape = Shape::new(&[planes.len(), planes[0].len(), planes[0][0].len()])
        .expect("non-empty planes");
    let data: Vec<T> = planes
        .iter()
        .flat_map(|p| p.iter().flat_map(|r| r.iter().copied()))
        .collect();
    Stack::from_vec(shape, data).expect("rectangular planes")
}

/// Build a 2-D intensity stack from row literals
pub fn image_2d(rows: &[&[f64]]) -> ImageStack {
    from_rows(rows)
}

/// Build a 2-D label stack from row literals
pub fn labels_2d(rows: &[&[u32]]) -> LabelStack {
    from_rows(rows)
}

/// Build a 3-D intensity stack from plane literals
pub fn image_3d(planes: &[&[&[f64]]]) -> ImageStack {
    from_planes(planes)
}

/// Build a 3-D label stack from plane literals
pub fn labels_3d(planes: &[&[&[u32]]]) -> LabelStack {
    from_planes(planes)
}
