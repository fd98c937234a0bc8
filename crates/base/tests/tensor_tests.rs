use base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.rows(), 2);
    assert_eq!(tensor.cols(), 3);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        result,
        Err(TensorError::ShapeMismatch {
            expected: 6,
            got: 3
        })
    ));
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_row_access() {
    let tensor = Tensor::new(vec![2, 2], vec![1, 2, 3, 4]).unwrap();
    assert_eq!(tensor.row(0), Some(&[1, 2][..]));
    assert_eq!(tensor.row(1), Some(&[3, 4][..]));
    assert_eq!(tensor.row(2), None);
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<f32>::zeros(vec![3, 2]).unwrap();
    assert_eq!(tensor.data, vec![0.0; 6]);
}
