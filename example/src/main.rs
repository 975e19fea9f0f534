use fixgrid::{arr, mat, FixedArray, Matrix};

fn main() {
    let mut a = arr![1, 2, 3];
    a.fill(9);
    println!("filled: {:?}", a);

    let mut b = FixedArray::from_elem(3, 7);
    a.swap(&mut b);
    println!("swapped: {:?} {:?}", a, b);

    let moved = b.take();
    println!("moved: {:?}, left behind: {:?}", moved, b);

    let m = mat![[1, 2], [3, 4], [5, 6]];
    println!("{:?}", m);
    println!("m[1][1] = {}, m.at(2, 0) = {:?}", m[1][1], m.at(2, 0));
    if let Err(e) = m.at(3, 0) {
        println!("error: {}", e);
    }

    let mut g = Matrix::<f64>::zeros(3, 3);
    for (i, mut row) in g.row_iter_mut().enumerate() {
        row[i] = 1.0;
    }
    for row in g.row_iter() {
        println!("{:?}", row);
    }
}
