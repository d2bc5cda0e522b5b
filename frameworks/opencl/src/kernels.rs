//! Embedded OpenCL C source for the six kernel variants (2 metrics x 3
//! tiers). The flat tier's CAS protocol and the strict `</`>` tie-break
//! rule match `specterra::classify::metric` exactly, so a correctly-driven
//! OpenCL run reproduces the native backend's labels.

pub const SOURCE: &str = r#"
#pragma OPENCL EXTENSION cl_khr_global_int32_base_atomics : enable

inline float bil_at(__global const float* cube, uint samples, uint bands,
                     uint line, uint sample, uint band) {
    return cube[line * (samples * bands) + band * samples + sample];
}

inline float squared_euclidean(__global const float* cube, __global const float* spectra,
                                uint samples, uint bands, uint line, uint sample, uint spectrum) {
    float sum = 0.0f;
    for (uint b = 0; b < bands; b++) {
        float diff = bil_at(cube, samples, bands, line, sample, b) - spectra[spectrum * bands + b];
        sum += diff * diff;
    }
    return sum;
}

inline float pearson(__global const float* cube, __global const float* spectra,
                      uint samples, uint bands, uint line, uint sample, uint spectrum) {
    float n = (float) bands;
    float sum_p = 0.0f, sum_s = 0.0f, sum_pp = 0.0f, sum_ss = 0.0f, sum_ps = 0.0f;

    for (uint b = 0; b < bands; b++) {
        float p = bil_at(cube, samples, bands, line, sample, b);
        float s = spectra[spectrum * bands + b];
        sum_p += p;
        sum_s += s;
        sum_pp += p * p;
        sum_ss += s * s;
        sum_ps += p * s;
    }

    float numerator = n * sum_ps - sum_p * sum_s;
    float denominator = sqrt((n * sum_pp - sum_p * sum_p) * (n * sum_ss - sum_s * sum_s));
    return numerator / denominator;
}

// Flat tier (C4 "Flat"): one work-item per (pixel, spectrum) pair. Each
// work-item races to post its score into `scores[pixel]`/`indices[pixel]`
// through a CAS loop; a non-strict improvement never attempts the
// exchange, so the first lane to post a given score keeps the slot.
__kernel void classify_flat_euclidean(
    __global const float* cube, __global const float* spectra,
    __global volatile uint* scores, __global volatile int* indices,
    uint samples, uint bands, uint n_spectrums)
{
    size_t gid = get_global_id(0);
    size_t pixel = gid / n_spectrums;
    size_t spectrum = gid % n_spectrums;
    uint line = pixel / samples;
    uint sample = pixel % samples;

    float candidate = squared_euclidean(cube, spectra, samples, bands, line, sample, (uint) spectrum);

    __global volatile uint* cell = &scores[pixel];
    uint current_bits = *cell;
    while (candidate < as_float(current_bits)) {
        uint prev = atom_cmpxchg(cell, current_bits, as_uint(candidate));
        if (prev == current_bits) {
            indices[pixel] = (int) spectrum;
            break;
        }
        current_bits = prev;
    }
}

__kernel void classify_flat_ccm(
    __global const float* cube, __global const float* spectra,
    __global volatile uint* scores, __global volatile int* indices,
    uint samples, uint bands, uint n_spectrums)
{
    size_t gid = get_global_id(0);
    size_t pixel = gid / n_spectrums;
    size_t spectrum = gid % n_spectrums;
    uint line = pixel / samples;
    uint sample = pixel % samples;

    float candidate = pearson(cube, spectra, samples, bands, line, sample, (uint) spectrum);

    __global volatile uint* cell = &scores[pixel];
    uint current_bits = *cell;
    while (candidate > as_float(current_bits)) {
        uint prev = atom_cmpxchg(cell, current_bits, as_uint(candidate));
        if (prev == current_bits) {
            indices[pixel] = (int) spectrum;
            break;
        }
        current_bits = prev;
    }
}

// Grouped tier (C4 "Grouped"): one work-group per line-segment of pixels
// (the work-group size divides `samples`, so a group never spans more than
// one line), one work-item per pixel in that segment, sequential scan over
// spectra.
__kernel void classify_grouped_euclidean(
    __global const float* cube, __global const float* spectra,
    __global int* indices,
    uint samples, uint bands, uint n_spectrums)
{
    size_t pixel = get_group_id(0) * get_local_size(0) + get_local_id(0);
    uint line = pixel / samples;
    uint sample = pixel % samples;

    float best = INFINITY;
    int best_index = 0;

    for (uint spectrum = 0; spectrum < n_spectrums; spectrum++) {
        float candidate = squared_euclidean(cube, spectra, samples, bands, (uint) line, (uint) sample, spectrum);
        if (candidate < best) {
            best = candidate;
            best_index = (int) spectrum;
        }
    }

    indices[pixel] = best_index;
}

__kernel void classify_grouped_ccm(
    __global const float* cube, __global const float* spectra,
    __global int* indices,
    uint samples, uint bands, uint n_spectrums)
{
    size_t pixel = get_group_id(0) * get_local_size(0) + get_local_id(0);
    uint line = pixel / samples;
    uint sample = pixel % samples;

    float best = -1.1f;
    int best_index = 0;

    for (uint spectrum = 0; spectrum < n_spectrums; spectrum++) {
        float candidate = pearson(cube, spectra, samples, bands, (uint) line, (uint) sample, spectrum);
        if (candidate > best) {
            best = candidate;
            best_index = (int) spectrum;
        }
    }

    indices[pixel] = best_index;
}

// GroupedCached tier (C4 "GroupedCached"): like Grouped, but each
// work-item first stages its own pixel's bands into `local_mem` (one
// contiguous `bands`-length run per work-item, indexed by its position
// within the work-group rather than within the line) before scanning
// spectra, trading a barrier for band accesses from on-chip rather than
// global memory.
__kernel void classify_tiled_euclidean(
    __global const float* cube, __global const float* spectra,
    __global int* indices, __local float* local_mem,
    uint samples, uint bands, uint n_spectrums)
{
    size_t local_id = get_local_id(0);
    size_t pixel = get_group_id(0) * get_local_size(0) + local_id;
    uint line = pixel / samples;
    uint sample = pixel % samples;
    size_t tile_offset = local_id * bands;

    for (uint b = 0; b < bands; b++) {
        local_mem[tile_offset + b] = bil_at(cube, samples, bands, line, sample, b);
    }

    barrier(CLK_LOCAL_MEM_FENCE);

    float best = INFINITY;
    int best_index = 0;

    for (uint spectrum = 0; spectrum < n_spectrums; spectrum++) {
        float sum = 0.0f;
        for (uint b = 0; b < bands; b++) {
            float diff = local_mem[tile_offset + b] - spectra[spectrum * bands + b];
            sum += diff * diff;
        }
        if (sum < best) {
            best = sum;
            best_index = (int) spectrum;
        }
    }

    indices[pixel] = best_index;
}

__kernel void classify_tiled_ccm(
    __global const float* cube, __global const float* spectra,
    __global int* indices, __local float* local_mem,
    uint samples, uint bands, uint n_spectrums)
{
    size_t local_id = get_local_id(0);
    size_t pixel = get_group_id(0) * get_local_size(0) + local_id;
    uint line = pixel / samples;
    uint sample = pixel % samples;
    size_t tile_offset = local_id * bands;

    for (uint b = 0; b < bands; b++) {
        local_mem[tile_offset + b] = bil_at(cube, samples, bands, line, sample, b);
    }

    barrier(CLK_LOCAL_MEM_FENCE);

    float n = (float) bands;
    float best = -1.1f;
    int best_index = 0;

    for (uint spectrum = 0; spectrum < n_spectrums; spectrum++) {
        float sum_p = 0.0f, sum_s = 0.0f, sum_pp = 0.0f, sum_ss = 0.0f, sum_ps = 0.0f;
        for (uint b = 0; b < bands; b++) {
            float p = local_mem[tile_offset + b];
            float s = spectra[spectrum * bands + b];
            sum_p += p;
            sum_s += s;
            sum_pp += p * p;
            sum_ss += s * s;
            sum_ps += p * s;
        }
        float numerator = n * sum_ps - sum_p * sum_s;
        float denominator = sqrt((n * sum_pp - sum_p * sum_p) * (n * sum_ss - sum_s * sum_s));
        float candidate = numerator / denominator;
        if (candidate > best) {
            best = candidate;
            best_index = (int) spectrum;
        }
    }

    indices[pixel] = best_index;
}
"#;
