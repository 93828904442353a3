//! Two-way merge kernels shared by both rounds.
//!
//! Every kernel here is stable: when neither element is less than the other, the one from the
//! left input is emitted first.

use std::mem;

/// Merges `left` and `right` into `dst`, which must be exactly `left.len() + right.len()` long.
pub(crate) fn merge_into<T, F>(left: &[T], right: &[T], dst: &mut [T], is_less: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    debug_assert_eq!(dst.len(), left.len() + right.len());

    let (mut i, mut j, mut out) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if is_less(&right[j], &left[i]) {
            dst[out].clone_from(&right[j]);
            j += 1;
        } else {
            dst[out].clone_from(&left[i]);
            i += 1;
        }
        out += 1;
    }

    // At most one of these is non-empty.
    let left_tail = &left[i..];
    dst[out..out + left_tail.len()].clone_from_slice(left_tail);
    out += left_tail.len();
    dst[out..].clone_from_slice(&right[j..]);
}

/// Fuses the adjacent sorted runs `v[..mid]` and `v[mid..]` into one sorted run.
///
/// Uses a scratch buffer the size of the shorter run when one can be allocated, O(n).
/// Otherwise falls back to a rotation based merge with O(1) extra memory, O(n log n).
pub(crate) fn merge_in_place<T, F>(v: &mut [T], mid: usize, is_less: &F)
where
    T: Default,
    F: Fn(&T, &T) -> bool,
{
    let len = v.len();
    if mid == 0 || mid >= len || !is_less(&v[mid], &v[mid - 1]) {
        return;
    }

    let shorter = mid.min(len - mid);
    let mut buf = Vec::new();
    match buf.try_reserve_exact(shorter) {
        Ok(()) if mid <= len - mid => merge_lo(v, mid, buf, is_less),
        Ok(()) => merge_hi(v, mid, buf, is_less),
        Err(err) => {
            tracing::warn!(len, %err, "no scratch memory for in-place merge, rotating instead");
            merge_rotating(v, mid, is_less);
        }
    }
}

/// Left run moved into `buf`, merged front to back.
fn merge_lo<T, F>(v: &mut [T], mid: usize, mut buf: Vec<T>, is_less: &F)
where
    T: Default,
    F: Fn(&T, &T) -> bool,
{
    buf.extend(v[..mid].iter_mut().map(mem::take));

    // v[out..j] are the holes left behind, always exactly buf.len() - i of them.
    let (mut i, mut j, mut out) = (0, mid, 0);
    while i < buf.len() && j < v.len() {
        if is_less(&v[j], &buf[i]) {
            v.swap(out, j);
            j += 1;
        } else {
            v[out] = mem::take(&mut buf[i]);
            i += 1;
        }
        out += 1;
    }

    for (slot, value) in v[out..].iter_mut().zip(buf.drain(i..)) {
        *slot = value;
    }
}

/// Right run moved into `buf`, merged back to front.
fn merge_hi<T, F>(v: &mut [T], mid: usize, mut buf: Vec<T>, is_less: &F)
where
    T: Default,
    F: Fn(&T, &T) -> bool,
{
    buf.extend(v[mid..].iter_mut().map(mem::take));

    // v[i..out] are the holes, always exactly j of them.
    let (mut i, mut j, mut out) = (mid, buf.len(), v.len());
    while i > 0 && j > 0 {
        out -= 1;
        if is_less(&buf[j - 1], &v[i - 1]) {
            v.swap(out, i - 1);
            i -= 1;
        } else {
            v[out] = mem::take(&mut buf[j - 1]);
            j -= 1;
        }
    }

    for (slot, value) in v[..j].iter_mut().zip(buf.drain(..j)) {
        *slot = value;
    }
}

/// Buffer-free merge: split both runs around a pivot, rotate the middle pieces past each other
/// and recurse on the two halves.
pub(crate) fn merge_rotating<T, F>(v: &mut [T], mid: usize, is_less: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let len = v.len();
    if mid == 0 || mid >= len {
        return;
    }
    if len == 2 {
        if is_less(&v[1], &v[0]) {
            v.swap(0, 1);
        }
        return;
    }

    let (cut_left, cut_right) = if mid > len - mid {
        let cut_left = mid / 2;
        let pivot = &v[cut_left];
        // Right elements strictly less than the pivot move in front of it.
        let cut_right = mid + v[mid..].partition_point(|x| is_less(x, pivot));
        (cut_left, cut_right)
    } else {
        let cut_right = mid + (len - mid) / 2;
        let pivot = &v[cut_right];
        // Left elements equal to the pivot stay in front of it.
        let cut_left = v[..mid].partition_point(|x| !is_less(pivot, x));
        (cut_left, cut_right)
    };

    v[cut_left..cut_right].rotate_left(mid - cut_left);
    let new_mid = cut_left + (cut_right - mid);
    let (lo, hi) = v.split_at_mut(new_mid);
    merge_rotating(lo, cut_left, is_less);
    merge_rotating(hi, mid - cut_left, is_less);
}
