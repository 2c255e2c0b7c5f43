use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format (`xyxy`), contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent, bound = "")]
pub struct BBox<F: BBoxFormat + PartialEq>([f32; 4], #[serde(skip)] PhantomData<F>);

impl<F: BBoxFormat + PartialEq> BBox<F> {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        BBox([x1, y1, x2, y2], Default::default())
    }

    #[inline]
    pub fn as_xywh(&self) -> BBox<Xywh> {
        self.into()
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.right() - self.left()
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.bottom() - self.top()
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Axis-aligned intersection-over-union, `0.0` for disjoint boxes or an empty union.
    pub fn iou(&self, other: &BBox<Ltrb>) -> f32 {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return 0.0;
        }

        let i_area = (right - left) * (bottom - top);
        let union = self.area() + other.area() - i_area;

        if union == 0.0 {
            return 0.0;
        }

        i_area / union
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        BBox([cx, cy, w, h], Default::default())
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }
}

impl<'a> From<&'a BBox<Ltrb>> for BBox<Xywh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        Self(
            [
                (v.0[0] + v.0[2]) / 2.0,
                (v.0[1] + v.0[3]) / 2.0,
                v.0[2] - v.0[0],
                v.0[3] - v.0[1],
            ],
            Default::default(),
        )
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        let (w2, h2) = (v.0[2] / 2.0, v.0[3] / 2.0);

        Self(
            [v.0[0] - w2, v.0[1] - h2, v.0[0] + w2, v.0[1] + h2],
            Default::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_identical_boxes() {
        let b = BBox::ltrb(10.0, 20.0, 50.0, 80.0);
        assert_eq!(b.iou(&b.clone()), 1.0);
    }

    #[test]
    fn iou_disjoint_boxes() {
        let b1 = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let b2 = BBox::ltrb(20.0, 20.0, 30.0, 30.0);
        assert_eq!(b1.iou(&b2), 0.0);
        assert_eq!(b2.iou(&b1), 0.0);
    }

    #[test]
    fn iou_contained_box_is_area_ratio() {
        let inner = BBox::ltrb(5.0, 5.0, 15.0, 15.0);
        let outer = BBox::ltrb(0.0, 0.0, 20.0, 20.0);
        assert_eq!(inner.iou(&outer), inner.area() / outer.area());
        assert_eq!(inner.iou(&outer), 0.25);
    }

    #[test]
    fn iou_touching_edges_is_zero() {
        let b1 = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let b2 = BBox::ltrb(10.0, 0.0, 20.0, 10.0);
        assert_eq!(b1.iou(&b2), 0.0);
    }

    #[test]
    fn iou_degenerate_boxes_zero_union() {
        let p = BBox::ltrb(3.0, 3.0, 3.0, 3.0);
        assert_eq!(p.iou(&p.clone()), 0.0);
    }

    #[test]
    fn iou_partial_overlap() {
        let b1 = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let b2 = BBox::ltrb(5.0, 0.0, 15.0, 10.0);
        // 50 / (100 + 100 - 50)
        assert!((b1.iou(&b2) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn center_conversion() {
        let b = BBox::ltrb(90.0, 40.0, 110.0, 60.0);
        let c = b.as_xywh();

        assert_eq!((c.cx(), c.cy(), c.width(), c.height()), (100.0, 50.0, 20.0, 20.0));
        assert_eq!(c.as_ltrb(), b);
    }

    #[test]
    fn serializes_as_plain_array() {
        let b = BBox::ltrb(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");

        let back: BBox<Ltrb> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
