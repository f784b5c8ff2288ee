use glam::DVec2;

/// Reduces a polyline with the Douglas-Peucker algorithm. Points closer than
/// `tolerance` to the simplified line are dropped; both endpoints are always
/// kept. A non-positive tolerance or fewer than three points returns the
/// input unchanged.
pub fn reduce_with_douglas_peucker(points: &[DVec2], tolerance: f64) -> Vec<DVec2> {
    let mut output = Vec::with_capacity(points.len());
    reduce_with_douglas_peucker_into(points, tolerance, &mut output);
    output
}

pub fn reduce_with_douglas_peucker_into(points: &[DVec2], tolerance: f64, output: &mut Vec<DVec2>) {
    output.clear();
    if tolerance <= 0.0 || points.len() < 3 {
        output.extend_from_slice(points);
        return;
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0usize, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_index = first;
        for i in first + 1..last {
            let dist = perpendicular_distance(points[i], points[first], points[last]);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }

        if max_dist > tolerance {
            keep[max_index] = true;
            stack.push((first, max_index));
            stack.push((max_index, last));
        }
    }

    output.extend(
        points
            .iter()
            .zip(keep.iter())
            .filter_map(|(p, k)| k.then_some(*p)),
    );
}

fn perpendicular_distance(p: DVec2, start: DVec2, end: DVec2) -> f64 {
    let line = end - start;
    let len = line.length();
    if len == 0.0 {
        return p.distance(start);
    }
    (line.perp_dot(p - start)).abs() / len
}
