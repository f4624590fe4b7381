use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Stack token id sequences into a `[batch_size, seq_length]` tensor, truncating long sequences
/// and padding short ones with `pad_token`
pub fn pad_to<B: Backend>(
    pad_token: usize,
    tokens_list: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = tokens_list.len();

    let mut values: Vec<B::IntElem> = Vec::with_capacity(batch_size * seq_length);

    for tokens in tokens_list {
        let length = tokens.len().min(seq_length);

        values.extend(
            tokens
                .into_iter()
                .take(seq_length)
                .map(|token| (token as i64).elem::<B::IntElem>()),
        );
        values.extend(
            std::iter::repeat((pad_token as i64).elem::<B::IntElem>()).take(seq_length - length),
        );
    }

    Tensor::from_data(
        Data::new(values, Shape::new([batch_size, seq_length])),
        device,
    )
}

/// Build a 1D float tensor from a list of values
pub fn floats<B: Backend>(values: Vec<f32>, device: &B::Device) -> Tensor<B, 1> {
    let length = values.len();
    let values: Vec<B::FloatElem> = values.into_iter().map(|value| value.elem()).collect();

    Tensor::from_data(Data::new(values, Shape::new([length])), device)
}

/// Copy a 1D float tensor back into a list of values
pub fn to_vec<B: Backend>(tensor: Tensor<B, 1>) -> Vec<f32> {
    tensor.into_data().convert::<f32>().value
}
