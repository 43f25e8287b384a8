/// Evenly spaced samples over a closed interval, numpy.linspace style.
///
/// The last sample is exactly `max` so a symmetric universe produces a
/// symmetric sample set.
#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 { (max - min) / (n - 1) as f64 } else { 0. };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let i = self.index;
        self.index += 1;
        if i + 1 == self.len && self.len > 1 {
            Some(self.end)
        } else {
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let xs: Vec<f64> = Linspace::new(0., 3., 4).collect();
    assert_eq!(xs, vec![0., 1., 2., 3.]);

    let xs: Vec<f64> = Linspace::new(0., 0.3, 4).collect();
    assert_eq!(xs.len(), 4);
    assert_eq!(xs[3], 0.3);

    assert_eq!(Linspace::new(5., 5., 1).collect::<Vec<_>>(), vec![5.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}
