// Prometheus remote-write v1 messages, restricted to the fields this tool
// sends. See https://prometheus.io/docs/concepts/remote_write_spec/
//
// message WriteRequest { repeated TimeSeries timeseries = 1; }
// message TimeSeries   { repeated Label labels = 1; repeated Sample samples = 2; }
// message Label        { string name = 1; string value = 2; }
// message Sample       { double value = 1; int64 timestamp = 2; }

#[derive(Clone, PartialEq, prost::Message)]
pub struct WriteRequest {
    #[prost(message, repeated, tag = "1")]
    pub timeseries: Vec<TimeSeries>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TimeSeries {
    #[prost(message, repeated, tag = "1")]
    pub labels: Vec<Label>,
    #[prost(message, repeated, tag = "2")]
    pub samples: Vec<Sample>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Label {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Sample {
    #[prost(double, tag = "1")]
    pub value: f64,
    // Milliseconds since epoch.
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
}
