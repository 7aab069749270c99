/// A single rule applied during simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a + (b + c) = a + b + c`
    FlattenSum,

    /// `2 + 3 = 5`
    AddNumbers,

    /// `a + 0 = a`
    AddZero,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// `a * (b * c) = a * b * c`
    FlattenProduct,

    /// `2 * 3 = 6`
    MultiplyNumbers,

    /// `a * 0 = 0`
    MultiplyZero,

    /// `a * 1 = a`
    MultiplyOne,

    /// `a^b * a^c = a^(b + c)`
    CombineLikeFactors,

    /// `2(x + 1) = 2x + 2`
    DistributeCoefficient,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`, `a > 0`
    ZeroPower,

    /// `2^3 = 8`
    NumericPower,

    /// `(a^b)^c = a^(bc)`, `c` an integer
    PowerOfPower,

    /// `(ab)^c = a^c * b^c`, `c` an integer
    DistributePower,

    /// `sqrt(12) = 2sqrt(3)`
    Root,

    /// `e^log(a) = a`
    ExpLog,

    /// `sin(pi/6) = 1/2`
    Sin,

    /// `cos(pi/3) = 1/2`
    Cos,

    /// `tan(pi/4) = 1`
    Tan,

    /// `asin(1/2) = pi/6`, and likewise for `acos` and `atan`
    InverseTrig,

    /// `sin(-x) = -sin(x)`, `cos(-x) = cos(x)`
    TrigParity,

    /// `log(1) = 0`, `log(e^a) = a`
    Log,

    /// `abs(-2) = 2`
    Abs,

    /// A function applied to a decimal, such as `sin(0.5)`, evaluated numerically.
    EvaluateCall,

    /// `sin(x)^2 + cos(x)^2 = 1`
    Pythagorean,
}
