use core::mem;

/// LSD radix sort over the column indices of a sparse vector (SoA layout).
/// - Sorts `inds` ascending
/// - Moves `vals` along with their index
/// - Stable: equal indices keep their input order
///
/// Complexity: 4 passes, each O(n + 256)
#[inline]
pub fn radix_sort_by_index<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len(), "index/value length mismatch");
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // 小さい入力は挿入ソートの方が速い
    if n <= 32 {
        insertion_sort_by_index(inds, vals);
        return;
    }

    let mut inds_tmp = inds.to_vec();
    let mut vals_tmp = vals.to_vec();

    let mut src_inds: &mut [u32] = inds;
    let mut src_vals: &mut [N] = vals;
    let mut dst_inds: &mut [u32] = &mut inds_tmp;
    let mut dst_vals: &mut [N] = &mut vals_tmp;

    for shift in [0u32, 8, 16, 24] {
        let mut count = [0usize; 256];
        for &k in src_inds.iter() {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }

        // prefix sum -> start position of every bucket
        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for idx in 0..n {
            let k = src_inds[idx];
            let bucket = ((k >> shift) & 0xFF) as usize;
            let pos = count[bucket];
            count[bucket] = pos + 1;
            dst_inds[pos] = k;
            dst_vals[pos] = src_vals[idx];
        }

        mem::swap(&mut src_inds, &mut dst_inds);
        mem::swap(&mut src_vals, &mut dst_vals);
    }
    // 4 passes (even): the sorted data is back in the caller's slices.
}

#[inline]
fn insertion_sort_by_index<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_stable_sort(inds: &[u32], vals: &[f64]) -> (Vec<u32>, Vec<f64>) {
        let mut pairs: Vec<(u32, f64)> = inds.iter().copied().zip(vals.iter().copied()).collect();
        pairs.sort_by_key(|p| p.0);
        pairs.into_iter().unzip()
    }

    /// xorshift32
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn empty_and_single() {
        let mut inds: Vec<u32> = vec![];
        let mut vals: Vec<f64> = vec![];
        radix_sort_by_index(&mut inds, &mut vals);
        assert!(inds.is_empty());

        let mut inds = vec![42u32];
        let mut vals = vec![0.5];
        radix_sort_by_index(&mut inds, &mut vals);
        assert_eq!(inds, vec![42]);
        assert_eq!(vals, vec![0.5]);
    }

    #[test]
    fn keeps_values_paired_with_their_index() {
        let mut inds = vec![7u32, 1, 5, 0, 3];
        let mut vals = vec![7.0, 1.0, 5.0, 0.0, 3.0];
        radix_sort_by_index(&mut inds, &mut vals);
        assert_eq!(inds, vec![0, 1, 3, 5, 7]);
        assert_eq!(vals, vec![0.0, 1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn matches_stable_baseline_across_sizes() {
        let mut rng = Rng(0x1234_5678);
        for &n in &[2usize, 31, 32, 33, 64, 129, 1024, 5000] {
            let mut inds = Vec::with_capacity(n);
            let mut vals = Vec::with_capacity(n);
            for i in 0..n {
                // duplicates are likely with the mask
                inds.push(rng.next_u32() & 0x00FF_0FFF);
                vals.push(i as f64);
            }
            let (base_k, base_v) = baseline_stable_sort(&inds, &vals);
            radix_sort_by_index(&mut inds, &mut vals);
            assert_eq!(inds, base_k, "keys mismatch at n={n}");
            assert_eq!(vals, base_v, "vals mismatch at n={n}");
        }
    }

    #[test]
    fn extremes() {
        let mut inds = vec![0u32, u32::MAX, 1, u32::MAX - 1, 2];
        let mut vals: Vec<f64> = (0..inds.len()).map(|i| i as f64).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);
        radix_sort_by_index(&mut inds, &mut vals);
        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }
}
