#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Writes a `wfile.dat` with one `k0 .. k7 W` line per entry.
pub fn write_weights(folder: &Path, entries: &[([i64; 8], f64)]) {
    fs::create_dir_all(folder).expect("folder");
    let body: String = entries
        .iter()
        .map(|(key, weight)| format!("{} {weight}\n", join(key)))
        .collect();
    fs::write(folder.join("wfile.dat"), body).expect("write weights");
}

/// Writes an `energy.dat` at `relative` below `folder`, one line per key.
pub fn write_samples(folder: &Path, relative: &str, keys: &[[i64; 8]]) {
    let path = folder.join(relative).join("energy.dat");
    fs::create_dir_all(path.parent().expect("parent")).expect("sample dir");
    let body: String = keys
        .iter()
        .enumerate()
        .map(|(step, key)| format!("{step} -1.25 0.5 0.75 3 {}\n", join(key)))
        .collect();
    fs::write(path, body).expect("write samples");
}

/// Key whose classifier component (index 3) is `classifier`.
pub fn key(first: i64, classifier: i64) -> [i64; 8] {
    [first, 0, 0, classifier, 0, 0, 0, 0]
}

/// Folder with `a` state-A and `b` state-B samples over two weighted bins.
pub fn two_state_folder(folder: &Path, weight_a: f64, weight_b: f64, a: usize, b: usize) {
    write_weights(folder, &[(key(1, 0), weight_a), (key(1, 2), weight_b)]);
    let mut keys = vec![key(1, 0); a];
    keys.extend(std::iter::repeat(key(1, 2)).take(b));
    write_samples(folder, "run_0", &keys);
}

fn join(key: &[i64; 8]) -> String {
    key.iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
