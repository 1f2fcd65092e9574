use egui::Pos2;

/// Turns raw pointer samples into a denser, visually smooth path.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait Smoother {
    fn smooth(&self, points: &[Pos2]) -> Vec<Pos2>;
}

/// Cardinal spline through every sample.
///
/// The first and last samples are duplicated so the curve starts and ends on
/// them, and each span between two samples is split into `segments` pieces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardinalSpline {
    pub tension: f32,
    pub segments: usize,
}

impl Default for CardinalSpline {
    fn default() -> Self {
        Self {
            tension: 0.5,
            segments: 16,
        }
    }
}

impl Smoother for CardinalSpline {
    fn smooth(&self, points: &[Pos2]) -> Vec<Pos2> {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Vec::new();
        };
        if points.len() < 2 || self.segments == 0 {
            return points.to_vec();
        }

        let mut padded = Vec::with_capacity(points.len() + 2);
        padded.push(first);
        padded.extend_from_slice(points);
        padded.push(last);

        let mut out = Vec::with_capacity((points.len() - 1) * self.segments + 1);
        for w in padded.windows(4) {
            let (p0, p1, p2, p3) = (w[0], w[1], w[2], w[3]);
            let t1 = (p2 - p0) * self.tension;
            let t2 = (p3 - p1) * self.tension;

            for s in 0..self.segments {
                let st = s as f32 / self.segments as f32;
                let st2 = st * st;
                let st3 = st2 * st;

                let c1 = 2.0 * st3 - 3.0 * st2 + 1.0;
                let c2 = -2.0 * st3 + 3.0 * st2;
                let c3 = st3 - 2.0 * st2 + st;
                let c4 = st3 - st2;

                out.push(Pos2::new(
                    c1 * p1.x + c2 * p2.x + c3 * t1.x + c4 * t2.x,
                    c1 * p1.y + c2 * p2.y + c3 * t1.y + c4 * t2.y,
                ));
            }
        }
        out.push(last);
        out
    }
}
