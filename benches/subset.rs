use demoset::npy::{Header, NpyArray};
use divan::Bencher;
use ndarray::Array3;

fn main() {
    divan::main();
}

fn cube() -> NpyArray {
    Array3::<f32>::from_shape_fn((1060, 40, 40), |(i, j, k)| (i + j + k) as f32)
        .into_dyn()
        .into()
}

#[divan::bench(args = [1, 150, 1060])]
fn write_leading(b: Bencher, n: usize) {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("demo.npy");
    let a = cube();

    b.bench(|| a.write_leading(n, &p).unwrap());
}

#[divan::bench]
fn read_header(b: Bencher) {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("full.npy");
    cube().write_leading(1060, &p).unwrap();

    b.bench(|| Header::from_path(&p).unwrap());
}

#[divan::bench]
fn read_full(b: Bencher) {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("full.npy");
    cube().write_leading(1060, &p).unwrap();
    let h = Header::from_path(&p).unwrap();

    b.bench(|| NpyArray::read(&p, &h).unwrap());
}
